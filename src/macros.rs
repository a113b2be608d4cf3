//===========================================================================//

// Builds an `io::Error` of the given kind from a message or format string.
macro_rules! io_error {
    ($kind:ident, $e:expr) => {
        ::std::io::Error::new(::std::io::ErrorKind::$kind, $e)
    };
    ($kind:ident, $fmt:expr, $($arg:tt)+) => {
        ::std::io::Error::new(::std::io::ErrorKind::$kind,
                              format!($fmt, $($arg)+))
    };
}

// Returns early with an `InvalidData` error; used when reading containers.
macro_rules! invalid_data {
    ($($arg:tt)+) => {
        return Err(io_error!(InvalidData, $($arg)+))
    };
}

// Returns early with an `InvalidInput` error; used when building containers.
macro_rules! invalid_input {
    ($($arg:tt)+) => {
        return Err(io_error!(InvalidInput, $($arg)+))
    };
}

//===========================================================================//
