//! Library integration tests.

use std::collections::HashMap;
use std::path::Path;

use deplink::config::{LinkSettings, Preset};
use deplink::linker::mock::{MockVersionProbe, MockWorkspace};
use deplink::linker::{EntryStatus, LinkContext, LinkOutcome, Linker};
use deplink::manifest::Manifest;
use deplink::ui::MockUI;
use deplink::DeplinkError;

#[test]
fn error_types_are_public() {
    let err = DeplinkError::VersionUndetectable {
        output: "garbage".into(),
    };
    assert!(err.to_string().contains("garbage"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> deplink::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use deplink::cli::{Cli, Commands};

    let cli = Cli::parse_from(["deplink", "link", "--no-clone"]);
    if let Some(Commands::Link(args)) = cli.command {
        assert!(args.no_clone);
    } else {
        panic!("Expected Link command");
    }
}

#[test]
fn auto_clone_run_with_doubles() {
    let settings = LinkSettings::for_preset(Preset::AutoClone);
    let probe = MockVersionProbe::returning("8.19.2\n");
    let workspace = MockWorkspace::new();
    let linker = Linker::new(&settings, &probe, &workspace, &workspace).unwrap();

    let env = HashMap::from([("NODE_ENV".to_string(), "dev".to_string())]);
    let ctx = LinkContext::new("/src/app", env);
    let manifest = Manifest::parse(
        r#"{"devDependencies": {
            "shared": "git+ssh://git@github.com:Mindflash/shared-lib.git#release-2"
        }}"#,
        Path::new("package.json"),
    )
    .unwrap();

    let mut ui = MockUI::new();
    let outcome = linker.run(&ctx, &mut ui, || Ok(manifest)).unwrap();

    let LinkOutcome::Completed(report) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(report.entries[0].status, EntryStatus::Linked);
    assert_eq!(
        workspace.clones()[0].0,
        "git@github.com:Mindflash/shared-lib.git"
    );
    assert_eq!(workspace.checkouts()[0].1, "release-2");
    assert!(ui.has_success("shared"));
}
