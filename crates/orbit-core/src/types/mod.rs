mod assessment;
mod whois;
mod zone;

pub use crate::address::AddressCollection;
pub use assessment::*;
pub use whois::*;
pub use zone::*;
