//! Integration tests for feeding execution results back into commands

use deploy_command::{
    Command, CommandEvent, CommandOptions, Error, ExecutionStatus, OutputSource,
};
use std::collections::HashMap;
use uuid::Uuid;

#[test]
fn test_events_drive_a_command_to_completion() -> anyhow::Result<()> {
    let mut cmd = Command::new(["whoami"])?;
    let id = cmd.uuid();
    assert_eq!(cmd.status(), ExecutionStatus::Pending);

    cmd.apply(&CommandEvent::output(id, OutputSource::Stdout, "dep"))?;
    cmd.apply(&CommandEvent::output(id, OutputSource::Stdout, "loy\n"))?;
    cmd.apply(&CommandEvent::output(id, OutputSource::Stderr, "warning\n"))?;
    assert!(!cmd.is_complete());

    cmd.apply(&CommandEvent::exited(id, 0))?;

    assert_eq!(cmd.stdout(), "deploy\n");
    assert_eq!(cmd.stderr(), "warning\n");
    assert_eq!(cmd.exit_status(), Some(0));
    assert!(cmd.is_complete());
    assert!(cmd.is_success());
    assert!(!cmd.is_failed());
    Ok(())
}

#[test]
fn test_fan_out_results_are_routed_by_uuid() -> anyhow::Result<()> {
    let mut commands: HashMap<Uuid, Command> = HashMap::new();
    for host in ["web-1", "web-2", "db-1"] {
        let cmd = Command::with_options(["uptime"], CommandOptions::new().with_host(host))?;
        commands.insert(cmd.uuid(), cmd);
    }
    assert_eq!(commands.len(), 3);

    let events: Vec<CommandEvent> = commands
        .values()
        .map(|cmd| {
            let code = if cmd.host() == Some("db-1") { 255 } else { 0 };
            CommandEvent::exited(cmd.uuid(), code)
        })
        .collect();

    for event in &events {
        let cmd = commands
            .get_mut(&event.uuid)
            .ok_or_else(|| anyhow::anyhow!("unknown command {}", event.uuid))?;
        cmd.apply(event)?;
    }

    for cmd in commands.values() {
        assert!(cmd.is_complete());
        assert_eq!(cmd.is_failure(), cmd.host() == Some("db-1"));
    }
    Ok(())
}

#[test]
fn test_event_for_another_command_is_rejected() -> anyhow::Result<()> {
    let mut first = Command::new(["date"])?;
    let second = Command::new(["date"])?;

    let event = CommandEvent::output(second.uuid(), OutputSource::Stdout, "noise");
    match first.apply(&event) {
        Err(Error::UuidMismatch { expected, actual }) => {
            assert_eq!(expected, first.uuid());
            assert_eq!(actual, second.uuid());
        }
        other => panic!("expected a uuid mismatch, got {:?}", other),
    }
    assert_eq!(first.stdout(), "");
    Ok(())
}

#[test]
fn test_finished_command_report() -> anyhow::Result<()> {
    let mut cmd = Command::builder()
        .args(["ls", "-l"])
        .current_dir("/opt/sites")
        .host("web-1")
        .build()?;
    cmd.append_stdout("total 0\n");
    cmd.set_exit_status(2);

    let report = serde_json::to_value(&cmd)?;
    assert_eq!(report["uuid"], cmd.uuid().to_string());
    assert_eq!(report["in"], "/opt/sites");
    assert_eq!(report["host"], "web-1");
    assert_eq!(report["exit_status"], 2);
    assert_eq!(report["stdout"], "total 0\n");
    assert_eq!(report["program"]["invocation"][1], "-l");
    Ok(())
}
