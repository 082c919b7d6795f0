use std::path::Path;
use std::io;

use super::sample_struct::Sample;
use crate::error::Result;


/// The delimiter set as default.
pub const DEFAULT_DELIMITER: char = ',';


/// A struct that returns [`Sample`].
/// Using this struct, one can read a delimited text file to [`Sample`].
/// The last column of the file is the label.
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use minicart::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::new()
///     .file(filename)
///     .has_header(true)
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P> {
    file: Option<P>,
    has_header: bool,
    delimiter: char,
}


impl<P> Default for SampleReader<P> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P> SampleReader<P> {
    /// Construct a new instance of [`SampleReader`].
    /// By default, the first line is treated as the header
    /// and cells are separated by `,`.
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: true,
            delimiter: DEFAULT_DELIMITER,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `true.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the cell delimiter.
    /// Default is `','`.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}


impl<P> SampleReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments,
    /// and returns `Result<Sample>`.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "The file name is not set. Use `SampleReader::file`."
            )
        })?;

        Sample::from_csv(file, self.has_header, self.delimiter)
    }
}
