pub mod prober;
pub mod transport;

pub use prober::{read_response, send_plan, TcpProber, DEFAULT_READ_LIMIT};
pub use transport::{TransportBuilder, TransportOptions};
