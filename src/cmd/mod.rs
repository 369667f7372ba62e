/// Binary-to-JSON command.
pub mod decode;
/// JSON-to-binary command.
pub mod encode;
/// Registry listing command.
pub mod fields;
/// Transaction identifier command.
pub mod hash;

mod util;
