mod resolve_locations;

pub use self::resolve_locations::*;
