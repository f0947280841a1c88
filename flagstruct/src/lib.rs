//! Bind configuration struct fields to command-line flags.
//!
//! Annotate `pub` fields with `#[flag = "<name>[,<help>]"]` and, optionally,
//! `#[flag_default = "<text>"]`, derive [`FlagStruct`], and hand a mutable
//! borrow of the struct to [`register`]. Each flagged field becomes a flag in
//! a [`FlagSet`] that writes parsed values straight into the field.
//!
//! ```
//! use flagstruct::{ClapFlags, FlagStruct, register};
//!
//! #[derive(FlagStruct)]
//! struct Config {
//!     #[flag = "in,The path of the input file"]
//!     pub input: String,
//!     #[flag = "out,The path of the output file"]
//!     pub output: String,
//!     #[flag = "count,The number of lines to process"]
//!     #[flag_default = "42"]
//!     pub count: i32,
//! }
//!
//! let mut config = Config {
//!     input: String::new(),
//!     output: String::new(),
//!     count: 17,
//! };
//! let mut flags = ClapFlags::new("demo");
//! register(&mut config, &mut flags)?;
//! let rest = flags.try_parse_from(["--in", "apple", "--out", "orange", "a", "b"])?;
//! assert_eq!(config.input, "apple");
//! assert_eq!(config.count, 42);
//! assert_eq!(rest, ["a", "b"]);
//! # Ok::<(), flagstruct::FlagStructError>(())
//! ```
//!
//! Supported field types are `bool`, `i32`, `i64`, `u32`, `u64`, `f64`,
//! [`std::time::Duration`], `String`, and any type implementing
//! [`FlagValue`]. The derive only applies to structs:
//!
//! ```compile_fail
//! use flagstruct::FlagStruct;
//!
//! #[derive(FlagStruct)]
//! enum Mode {
//!     Fast,
//!     Slow,
//! }
//! ```

extern crate self as flagstruct;

pub use flagstruct_macros::FlagStruct;

mod clap_flags;
mod error;
mod flag_set;
mod reflect;
mod register;
mod scan;
mod target;
pub mod value;

pub use clap_flags::ClapFlags;
pub use error::{FlagStructError, FlagStructResult, is_display_request};
pub use flag_set::{FlagSet, FlagSetError};
pub use reflect::{FieldSpec, Reflect, Shape};
pub use register::{Registrar, register, register_with_prefix};
pub use scan::{FieldDescriptor, HELP_SEPARATOR, scan, split_declaration};
#[doc(hidden)]
pub use target::__private;
pub use target::{Primitive, Target};
pub use value::{BoxError, FlagValue, Kind, ValueError};
