//! Top-level facade crate for robusto.
//!
//! Re-exports the packet primitives and the client runtime so users can depend
//! on a single crate. Most applications only need [`prelude`].

pub mod core {
    pub use robusto_core::*;
}

pub mod client {
    pub use robusto_client::*;
}

/// Types needed to start a client and run the built-in calls.
pub mod prelude {
    pub use robusto_client::config::{load_from_file, load_from_str, ClientConfig};
    pub use robusto_client::dispatch::{Completion, Dispatcher};
    pub use robusto_client::packets::*;
    pub use robusto_client::transport::{MockTransport, Transport};
    pub use robusto_client::{Client, Credentials};
    pub use robusto_core::packet::HasPersons;
    pub use robusto_core::{
        ErrorKind, Packet, PacketError, PacketParams, ProtocolError, RobustoPacket, WimPacket,
    };
}
