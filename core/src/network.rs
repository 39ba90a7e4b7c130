pub mod transport;

pub use transport::MulticastTransport;
