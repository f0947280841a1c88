//! Behavioural tests for registering records into a flag set.

use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use flagstruct::{BoxError, FlagStruct, FlagStructError, FlagValue, Kind, Registrar, register};
use rstest::rstest;
use test_helpers::RecordingFlags;

#[derive(Debug, Default, PartialEq, Eq)]
struct Level(u8);

impl FlagValue for Level {
    fn render(&self) -> String {
        self.0.to_string()
    }

    fn set(&mut self, text: &str) -> Result<(), BoxError> {
        let level: u8 = text.parse()?;
        if level > 5 {
            return Err(format!("level {level} exceeds 5").into());
        }
        self.0 = level;
        Ok(())
    }
}

#[derive(Debug, Default, FlagStruct)]
struct AllKinds {
    #[flag = "verbose,Chatty output"]
    pub verbose: bool,
    #[flag = "offset,Signed offset"]
    #[flag_default = "-3"]
    pub offset: i32,
    #[flag = "big,Wide signed value"]
    pub big: i64,
    #[flag = "workers,Worker count"]
    #[flag_default = "0x10"]
    pub workers: u32,
    #[flag = "limit,Byte limit"]
    pub limit: u64,
    #[flag = "ratio,Sampling ratio"]
    #[flag_default = "2.5"]
    pub ratio: f64,
    #[flag = "wait,Time to wait"]
    #[flag_default = "1m30s"]
    pub wait: Duration,
    #[flag = "name,Who to greet"]
    #[flag_default = "world"]
    pub name: String,
    #[flag = "level,Log level"]
    pub level: Level,
}

#[rstest]
#[case::no_prefix("")]
#[case::prefixed("foo_")]
fn registers_every_kind_under_prefixed_names(#[case] prefix: &str) -> Result<()> {
    let mut record = AllKinds::default();
    let mut flags = RecordingFlags::new();
    let registrar = Registrar::with_prefix(prefix);
    ensure!(registrar.prefix() == prefix);
    let count = registrar.register(&mut record, &mut flags)?;
    ensure!(count == 9, "registered {count}");

    let expected = [
        ("verbose", Kind::Bool, "false"),
        ("offset", Kind::Int, "-3"),
        ("big", Kind::Int64, "0"),
        ("workers", Kind::Uint, "16"),
        ("limit", Kind::Uint64, "0"),
        ("ratio", Kind::Float64, "2.5"),
        ("wait", Kind::Duration, "1m 30s"),
        ("name", Kind::String, "world"),
        ("level", Kind::Custom, "0"),
    ];
    ensure!(flags.len() == expected.len());
    for (declared, (name, kind, initial)) in flags.declarations().zip(expected) {
        ensure!(declared.name == format!("{prefix}{name}"), "{declared:?}");
        ensure!(declared.kind == kind, "{declared:?}");
        ensure!(declared.initial == initial, "{declared:?}");
    }
    Ok(())
}

#[rstest]
fn defaults_are_written_into_the_record() -> Result<()> {
    let mut record = AllKinds::default();
    let mut flags = RecordingFlags::new();
    register(&mut record, &mut flags)?;
    drop(flags);
    ensure!(record.offset == -3);
    ensure!(record.workers == 16);
    ensure!(record.wait == Duration::from_secs(90));
    ensure!(record.name == "world");
    ensure!(record.big == 0 && !record.verbose);
    Ok(())
}

#[rstest]
fn flag_set_writes_through_to_fields() -> Result<()> {
    let mut record = AllKinds::default();
    let mut flags = RecordingFlags::new();
    register(&mut record, &mut flags)?;
    flags.set("verbose", "t")?;
    flags.set("limit", "1_000")?;
    flags.set("level", "4")?;
    ensure!(flags.value("level").as_deref() == Some("4"));
    ensure!(flags.set("level", "9").is_err());
    drop(flags);
    ensure!(record.verbose);
    ensure!(record.limit == 1000);
    ensure!(record.level == Level(4));
    Ok(())
}

#[derive(Debug, FlagStruct)]
struct Described {
    #[flag = "x,some help"]
    pub with_help: String,
    #[flag = "y"]
    pub bare: String,
    #[flag = "z,a, b"]
    pub commas: String,
}

#[rstest]
#[case("x", "some help")]
#[case("y", "y")]
#[case("z", "a, b")]
fn help_comes_from_the_declaration(#[case] name: &str, #[case] help: &str) -> Result<()> {
    let mut record = Described {
        with_help: String::new(),
        bare: String::new(),
        commas: String::new(),
    };
    let mut flags = RecordingFlags::new();
    register(&mut record, &mut flags)?;
    let declared = flags
        .lookup(name)
        .ok_or_else(|| anyhow!("flag {name} missing"))?;
    ensure!(declared.help == help, "{declared:?}");
    Ok(())
}

#[derive(Debug, FlagStruct)]
struct Counted {
    #[flag = "count,The number of lines to process"]
    #[flag_default = "42"]
    pub with_default: i32,
    #[flag = "plain,The number of lines to skip"]
    pub without_default: i32,
}

#[rstest]
fn declared_default_overrides_current_value() -> Result<()> {
    let mut record = Counted {
        with_default: 17,
        without_default: 17,
    };
    let mut flags = RecordingFlags::new();
    register(&mut record, &mut flags)?;
    let initial = |name: &str| flags.lookup(name).map(|d| d.initial.clone());
    ensure!(initial("count").as_deref() == Some("42"));
    ensure!(initial("plain").as_deref() == Some("17"));
    drop(flags);
    ensure!(record.with_default == 42);
    ensure!(record.without_default == 17);
    Ok(())
}

#[derive(Debug, Default, FlagStruct)]
struct Visibility {
    #[flag = "shown,Registered"]
    pub shown: String,
    #[flag = "hidden,Never registered"]
    hidden: String,
    #[flag = "crate-only,Never registered"]
    pub(crate) crate_only: u64,
    pub untagged: Vec<String>,
    #[flag = ""]
    pub blank: String,
}

#[rstest]
fn only_exported_flagged_fields_are_registered() -> Result<()> {
    let mut record = Visibility::default();
    let mut flags = RecordingFlags::new();
    let count = register(&mut record, &mut flags)?;
    ensure!(count == 1);
    ensure!(flags.names() == ["shown"], "{:?}", flags.names());
    drop(flags);
    ensure!(record.hidden.is_empty() && record.crate_only == 0 && record.untagged.is_empty());
    Ok(())
}

#[derive(Debug, Default, FlagStruct)]
struct BadDefault {
    #[flag = "first,Declared before the failure"]
    pub first: String,
    #[flag = "n,An integer"]
    #[flag_default = "abc"]
    pub n: i32,
    #[flag = "last,Never reached"]
    pub last: String,
}

#[rstest]
fn malformed_default_stops_before_declaring() -> Result<()> {
    let mut record = BadDefault {
        n: 5,
        ..BadDefault::default()
    };
    let mut flags = RecordingFlags::new();
    let err = register(&mut record, &mut flags)
        .err()
        .ok_or_else(|| anyhow!("expected a default parse error"))?;
    ensure!(
        matches!(&err, FlagStructError::DefaultParse { name, text, .. } if name == "n" && text == "abc"),
        "unexpected error: {err}"
    );
    ensure!(flags.names() == ["first"], "{:?}", flags.names());
    drop(flags);
    ensure!(record.n == 5);
    Ok(())
}

#[derive(Debug, Default, FlagStruct)]
struct App {
    #[flag = "count,The number of lines to process"]
    pub count: i32,
}

#[rstest]
fn prefix_is_prepended_verbatim() -> Result<()> {
    let mut record = App::default();
    let mut flags = RecordingFlags::new();
    flagstruct::register_with_prefix("app_", &mut record, &mut flags)?;
    ensure!(flags.names() == ["app_count"]);
    Ok(())
}

#[rstest]
fn prefixes_keep_two_records_apart() -> Result<()> {
    let mut client = App::default();
    let mut server = App::default();
    let mut flags = RecordingFlags::new();
    Registrar::with_prefix("client-").register(&mut client, &mut flags)?;
    Registrar::with_prefix("server-").register(&mut server, &mut flags)?;
    ensure!(flags.names() == ["client-count", "server-count"]);
    Ok(())
}

#[rstest]
fn boxed_records_register_like_plain_ones() -> Result<()> {
    let mut record = Box::new(App::default());
    let mut flags = RecordingFlags::new();
    register(&mut record, &mut flags)?;
    ensure!(flags.names() == ["count"]);
    Ok(())
}
