//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::fmt;
use std::path::PathBuf;
use rayon;
use regex;

/// Type alias for wordtally errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring while counting
#[derive(Debug)]
pub enum Error {
    /// The input could not be opened at all. Nothing was counted.
    Input(PathBuf, io::Error),
    /// Reading failed part way through, at about this byte offset.
    StreamRead { offset: u64, source: io::Error },
    WorkerPanic { worker: usize, message: String },
    InvalidPattern(regex::Error),
    InvalidConfig(String),
    ThreadPool(rayon::ThreadPoolBuildError),
    IOError(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Input(ref path, ref err) => {
                write!(f, "Could not open the input file {}: {}", path.display(), err)
            }
            Error::StreamRead { offset, ref source } => {
                write!(f,
                    "Reading the input failed near byte {}. The counts would be incomplete, \
                    so nothing is reported. The OS error was: {}",
                    offset, source)
            }
            Error::WorkerPanic { worker, ref message } => {
                write!(f, "Counting worker #{} crashed: {}", worker, message)
            }
            Error::InvalidPattern(ref err) => write!(f, "Invalid token pattern: {}", err),
            Error::InvalidConfig(ref info) => write!(f, "Invalid configuration: {}", info),
            Error::ThreadPool(ref err) => write!(f, "Could not start worker threads: {}", err),
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Input(_, ref err) => Some(err),
            Error::StreamRead { ref source, .. } => Some(source),
            Error::WorkerPanic { .. } => None,
            Error::InvalidPattern(ref err) => Some(err),
            Error::InvalidConfig(_) => None,
            Error::ThreadPool(ref err) => Some(err),
            Error::IOError(ref err) => Some(err),
        }
    }
}
//
// Convert everything else into Error
//
impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err)
    }
}
impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(err)
    }
}
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}
