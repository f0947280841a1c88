//! Registration of scanned fields into a flag set.
//!
//! Registration is a single pass over the descriptors that stops at the first
//! failure. It is best effort, not transactional: flags declared and defaults
//! applied before the failing field stay in place.

use tracing::debug;

use crate::error::{FlagStructError, FlagStructResult};
use crate::flag_set::FlagSet;
use crate::reflect::Reflect;
use crate::scan::{FieldDescriptor, scan};
use crate::target::Target;

/// Registers records into flag sets, optionally prefixing every flag name.
///
/// # Examples
///
/// ```
/// use flagstruct::{ClapFlags, FlagStruct, Registrar};
///
/// #[derive(FlagStruct)]
/// struct Server {
///     #[flag = "port,Port to listen on"]
///     pub port: u32,
/// }
///
/// let mut server = Server { port: 8080 };
/// let mut flags = ClapFlags::new("demo");
/// let registrar = Registrar::with_prefix("server-");
/// assert_eq!(registrar.prefix(), "server-");
/// let registered = registrar.register(&mut server, &mut flags)?;
/// assert_eq!(registered, 1);
/// assert!(flags.lookup("server-port").is_some());
/// # Ok::<(), flagstruct::FlagStructError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registrar {
    prefix: String,
}

impl Registrar {
    /// Creates a registrar that uses declared names unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Creates a registrar that prepends `prefix` to every flag name.
    ///
    /// The prefix is used verbatim; include a separator such as `_` or `-`
    /// in it if one is wanted.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefix prepended to every flag name.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Scans `record` and registers each flaggable field into `flags`.
    ///
    /// Returns the number of flags declared.
    ///
    /// # Errors
    ///
    /// - [`FlagStructError::NotARecord`] when `record` is not a struct.
    /// - [`FlagStructError::NoFlaggableFields`] when nothing is flaggable.
    /// - Any error from [`Registrar::register_descriptor`]; registration
    ///   stops at the first failing field.
    pub fn register<'a, T, F>(&self, record: &'a mut T, flags: &mut F) -> FlagStructResult<usize>
    where
        T: Reflect + ?Sized,
        F: FlagSet<'a> + ?Sized,
    {
        let descriptors = scan(record)?;
        if descriptors.is_empty() {
            return Err(FlagStructError::NoFlaggableFields {
                type_name: std::any::type_name::<T>(),
            });
        }
        self.register_all(descriptors, flags)
    }

    /// Registers already scanned descriptors in order, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by
    /// [`Registrar::register_descriptor`].
    pub fn register_all<'a, I, F>(&self, descriptors: I, flags: &mut F) -> FlagStructResult<usize>
    where
        I: IntoIterator<Item = FieldDescriptor<'a>>,
        F: FlagSet<'a> + ?Sized,
    {
        let mut count = 0;
        for descriptor in descriptors {
            self.register_descriptor(descriptor, flags)?;
            count += 1;
        }
        Ok(count)
    }

    /// Applies the descriptor's default text, if any, then declares the
    /// field in `flags` under the prefixed name.
    ///
    /// # Errors
    ///
    /// - [`FlagStructError::UnsupportedType`] when the field's type cannot
    ///   hold a flag value.
    /// - [`FlagStructError::DefaultParse`] when the default text does not
    ///   parse; the flag set is not touched in that case.
    /// - [`FlagStructError::FlagSet`] when the flag set rejects the name.
    pub fn register_descriptor<'a, F>(
        &self,
        descriptor: FieldDescriptor<'a>,
        flags: &mut F,
    ) -> FlagStructResult<()>
    where
        F: FlagSet<'a> + ?Sized,
    {
        let field = descriptor.field();
        let (name, help, default_text, mut target) = descriptor.into_parts();
        if let Target::Unsupported { type_name } = target {
            return Err(FlagStructError::UnsupportedType { field, type_name });
        }

        if let Some(text) = default_text {
            if let Err(source) = target.set(&text) {
                return Err(FlagStructError::DefaultParse { name, text, source });
            }
            debug!(flag = %name, default = %text, "applied default");
        }

        let name = format!("{}{name}", self.prefix);
        match target {
            Target::Bool(t) => {
                let initial = *t;
                flags.declare_bool(t, &name, initial, &help)?;
            }
            Target::Int(t) => {
                let initial = *t;
                flags.declare_int(t, &name, initial, &help)?;
            }
            Target::Int64(t) => {
                let initial = *t;
                flags.declare_int64(t, &name, initial, &help)?;
            }
            Target::Uint(t) => {
                let initial = *t;
                flags.declare_uint(t, &name, initial, &help)?;
            }
            Target::Uint64(t) => {
                let initial = *t;
                flags.declare_uint64(t, &name, initial, &help)?;
            }
            Target::Float64(t) => {
                let initial = *t;
                flags.declare_float64(t, &name, initial, &help)?;
            }
            Target::Duration(t) => {
                let initial = *t;
                flags.declare_duration(t, &name, initial, &help)?;
            }
            Target::String(t) => {
                let initial = t.clone();
                flags.declare_string(t, &name, &initial, &help)?;
            }
            Target::Custom(t) => flags.declare_custom(t, &name, &help)?,
            Target::Unsupported { type_name } => {
                return Err(FlagStructError::UnsupportedType { field, type_name });
            }
        }
        debug!(flag = %name, "declared flag");
        Ok(())
    }
}

/// Registers every flaggable field of `record` into `flags` under its
/// declared name.
///
/// `record` must be a mutable borrow: the flag set keeps references to its
/// fields and writes parsed values through them. Passing the record by value
/// does not compile:
///
/// ```compile_fail
/// use flagstruct::{ClapFlags, FlagStruct, register};
///
/// #[derive(FlagStruct)]
/// struct Config {
///     #[flag = "n"]
///     pub n: i32,
/// }
///
/// let mut flags = ClapFlags::new("demo");
/// register(Config { n: 1 }, &mut flags).unwrap();
/// ```
///
/// # Examples
///
/// ```
/// use flagstruct::{ClapFlags, FlagStruct, register};
///
/// #[derive(FlagStruct)]
/// struct Config {
///     #[flag = "in,The path of the input file"]
///     pub input: String,
///     #[flag = "count,The number of lines to process"]
///     pub count: i32,
/// }
///
/// let mut config = Config { input: String::new(), count: 17 };
/// let mut flags = ClapFlags::new("demo");
/// register(&mut config, &mut flags)?;
/// flags.try_parse_from(["--in", "foo"])?;
/// assert_eq!(config.input, "foo");
/// assert_eq!(config.count, 17);
/// # Ok::<(), flagstruct::FlagStructError>(())
/// ```
///
/// # Errors
///
/// See [`Registrar::register`].
pub fn register<'a, T, F>(record: &'a mut T, flags: &mut F) -> FlagStructResult<usize>
where
    T: Reflect + ?Sized,
    F: FlagSet<'a> + ?Sized,
{
    Registrar::new().register(record, flags)
}

/// Behaves as [`register`], with every flag name prefixed by `prefix`.
///
/// # Errors
///
/// See [`Registrar::register`].
pub fn register_with_prefix<'a, T, F>(
    prefix: &str,
    record: &'a mut T,
    flags: &mut F,
) -> FlagStructResult<usize>
where
    T: Reflect + ?Sized,
    F: FlagSet<'a> + ?Sized,
{
    Registrar::with_prefix(prefix).register(record, flags)
}
