use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not set up {_0}")]
    Startup(#[error(not(source))] &'static str),
    #[display("lookup failed")]
    Resolve,
    #[display("inventory operation failed")]
    Inventory,
    #[display("no component with MPN {_0}")]
    UnknownMpn(#[error(not(source))] String),
    #[display("I/O error")]
    Io,
    #[display("HTTP server error")]
    Serve,
}
