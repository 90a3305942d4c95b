//! Error kinds, their descriptor table and rendered diagnostics
//!
//! Errors are collected during extraction and never abort it. Each one
//! surfaces as exactly one [`Diagnostic`] carrying a stable `DI00x` code.

use serde::{Deserialize, Serialize};

/// Position of an attribute or declaration in the host's sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({},{})", self.path, self.line, self.column)
    }
}

/// Every way an annotated accessor can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DuplicateService,
    InvalidFactory,
    InvalidGenericGetMethod,
    InvalidSetMethod,
    InvalidDelegate,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        Self::DuplicateService,
        Self::InvalidFactory,
        Self::InvalidGenericGetMethod,
        Self::InvalidSetMethod,
        Self::InvalidDelegate,
    ];

    pub fn descriptor(&self) -> &'static Descriptor {
        match self {
            Self::DuplicateService => &DUPLICATE_SERVICE,
            Self::InvalidFactory => &INVALID_FACTORY,
            Self::InvalidGenericGetMethod => &INVALID_GET_METHOD,
            Self::InvalidSetMethod => &INVALID_SET_METHOD,
            Self::InvalidDelegate => &INVALID_DELEGATE,
        }
    }

    pub fn code(&self) -> &'static str {
        self.descriptor().id
    }

    /// Whether the accessor falls back to a stub
    ///
    /// A duplicate claim leaves the first registration intact, so the
    /// container is still emitted in full.
    pub fn blocks_emission(&self) -> bool {
        !matches!(self, Self::DuplicateService)
    }

    /// Look a kind up by its `DI00x` code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(code))
    }
}

/// Static metadata attached to an [`ErrorKind`]
#[derive(Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// Positional `{0}`, `{1}`… placeholders filled from the message args
    pub message_format: &'static str,
    pub category: &'static str,
}

const CATEGORY: &str = "Locator";

static DUPLICATE_SERVICE: Descriptor = Descriptor {
    id: "DI001",
    title: "Duplicate service registration",
    message_format: "Service {0} cannot be registered for {1}; it is already registered for {2}",
    category: CATEGORY,
};

static INVALID_FACTORY: Descriptor = Descriptor {
    id: "DI002",
    title: "Invalid factory method",
    message_format: "Factory method {1} for {0} must have no parameters and return {0}",
    category: CATEGORY,
};

static INVALID_GET_METHOD: Descriptor = Descriptor {
    id: "DI003",
    title: "Invalid get method",
    message_format:
        "Get method {0} must have no parameters and a single generic parameter as its return type",
    category: CATEGORY,
};

static INVALID_SET_METHOD: Descriptor = Descriptor {
    id: "DI004",
    title: "Invalid set method",
    message_format: "Set method {0} must have a single generic parameter of its own type parameter and return void or bool",
    category: CATEGORY,
};

static INVALID_DELEGATE: Descriptor = Descriptor {
    id: "DI005",
    title: "Invalid delegate member",
    message_format: "Delegate member {0} must be a parameterless method, property or field",
    category: CATEGORY,
};

impl Descriptor {
    /// Substitute `{n}` placeholders; missing args render as empty strings
    pub fn format(&self, args: &[String]) -> String {
        let mut out = String::with_capacity(self.message_format.len());
        let mut rest = self.message_format;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => match after[..close].parse::<usize>() {
                    Ok(idx) => {
                        if let Some(arg) = args.get(idx) {
                            out.push_str(arg);
                        }
                        rest = &after[close + 1..];
                    }
                    Err(_) => {
                        out.push('{');
                        rest = after;
                    }
                },
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// A problem found while extracting one accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub location: Option<SourceLocation>,
    pub message_args: Vec<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, location: Option<SourceLocation>, message_args: Vec<String>) -> Self {
        Self {
            kind,
            location,
            message_args,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            descriptor: self.kind.descriptor(),
            location: self.location.clone(),
            message: self.kind.descriptor().format(&self.message_args),
        }
    }
}

/// What the host reports to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub descriptor: &'static Descriptor,
    pub location: Option<SourceLocation>,
    pub message: String,
}

impl Diagnostic {
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "error {}: {}", self.descriptor.id, self.message)
    }
}
