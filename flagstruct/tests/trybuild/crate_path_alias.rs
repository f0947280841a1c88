//! Trybuild fixture verifying `#[flagstruct(crate = "...")]` works with a
//! dependency renamed via `use ... as`.

use flagstruct as flags_rt;
use flags_rt::{ClapFlags, FlagStruct};

/// References the runtime through the aliased name.
#[derive(Debug, Default, FlagStruct)]
#[flagstruct(crate = "flags_rt")]
struct AliasedConfig {
    #[flag = "value,A string value"]
    pub value: String,
    #[flag = "count,A counter"]
    #[flag_default = "1"]
    pub count: u32,
}

fn main() -> Result<(), flags_rt::FlagStructError> {
    let mut config = AliasedConfig::default();
    let mut flags = ClapFlags::new("alias");
    flags_rt::register(&mut config, &mut flags)?;
    flags.try_parse_from(["--value", "hello"])?;
    assert_eq!(config.value, "hello");
    assert_eq!(config.count, 1);
    Ok(())
}
