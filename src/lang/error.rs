pub struct Error {
    code: ErrorCode,
    unit: Option<String>,
    line: Option<usize>,
    column: Option<usize>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $unit:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_unit($unit)
    };
    ($err:ident, $unit:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_unit($unit)
            .message($msg)
    };
    ($err:ident, $unit:expr, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_unit($unit)
            .in_line($line)
    };
    ($err:ident, $unit:expr, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_unit($unit)
            .in_line($line)
            .message($msg)
    };
    ($err:ident, $unit:expr, $line:expr, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_unit($unit)
            .in_line($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            unit: None,
            line: None,
            column: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Zero-based index of the source line.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn in_unit<S: Into<String>>(self, unit: S) -> Error {
        Error {
            unit: Some(unit.into()),
            ..self
        }
    }

    pub fn in_line(self, line: usize) -> Error {
        debug_assert!(self.line.is_none());
        Error {
            line: Some(line),
            ..self
        }
    }

    /// A column is only meaningful inside a known line.
    pub fn in_column(self, column: usize) -> Error {
        debug_assert!(self.line.is_some());
        debug_assert!(self.column.is_none());
        if self.line.is_none() {
            return self;
        }
        Error {
            column: Some(column),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnreadableInput,
    InvalidImage,
    UndefinedLabel,
    IncludeNotFound,
    RecursiveInclude,
    WriteFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self {
            UnreadableInput => "COULD NOT READ FILE",
            InvalidImage => "INVALID PROGRAM FILE",
            UndefinedLabel => "UNDEFINED LABEL",
            IncludeNotFound => "INCLUDE FILE NOT FOUND",
            RecursiveInclude => "RECURSIVE INCLUDE",
            WriteFailed => "COULD NOT WRITE FILE",
        };
        write!(f, "{}", code_str)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut prefix = String::new();
        if let Some(unit) = &self.unit {
            prefix.push_str(unit);
            if let Some(line) = self.line {
                prefix.push_str(&format!("({}", line + 1));
                if let Some(column) = self.column {
                    prefix.push_str(&format!(",{}", column + 1));
                }
                prefix.push(')');
            }
            prefix.push_str(": ");
        }
        if self.message.is_empty() {
            write!(f, "{}error: {}", prefix, self.code)
        } else {
            write!(f, "{}error: {}; {}", prefix, self.code, self.message)
        }
    }
}

impl std::error::Error for Error {}
