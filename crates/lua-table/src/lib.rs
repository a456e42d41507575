//! # lua-table
//!
//! Turns a nested value tree into a **Lua table literal** and reads such literals back.
//!
//! The serializer never escapes string content. Instead it picks a delimiter pair
//! that cannot occur inside the string: a plain `"..."` when that is safe, otherwise
//! the lowest long bracket level `[==[ ... ]==]` (up to level 9) that does not collide.
//! Mapping keys that are not plain Lua identifiers use computed-key syntax
//! (`["1foo"] = ...`) and are reported through `tracing` as strange keys.
//!
//! ## Quick start
//!
//! ```rust
//! use lua_table::{decode, serialize, LuaValue, Mapping};
//!
//! let mut map = Mapping::new();
//! map.insert("b", "test");
//! let value = LuaValue::from(map);
//!
//! let lua = serialize(&value, 0).unwrap();
//! assert_eq!(lua, "{\n  b = \"test\"\n}");
//!
//! // Lua literal → value (roundtrip)
//! assert_eq!(decode(&lua).unwrap(), value);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `LuaValue` tree and the insertion-ordered `Mapping`
//! - [`encoder`]: value → Lua literal (`serialize`, `to_module`, `encode` from JSON)
//! - [`decoder`]: Lua literal → value
//! - [`error`]: Error types for encode/parse failures

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod value;

pub use decoder::decode;
pub use encoder::{encode, select_delimiter, serialize, to_module, Delimiter, INDENT, MAX_LEVEL};
pub use error::LuaError;
pub use value::{LuaValue, Mapping, Number};
