//! Safe-write protocol tests: version checks, backup ordering, record-level
//! compare-and-swap.

use pretty_assertions::assert_eq;
use sshcm_core::{Error, HostFields, HostRecord, SafeWriter};
use sshcm_fs::{Settings, io};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ORIGINAL: &str = "\
# personal hosts
Host home
  HostName 192.168.1.10
  User me

Host work
  HostName work.example.com
  Port 2200
";

fn setup() -> (TempDir, PathBuf, SafeWriter) {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config");
    fs::write(&config, ORIGINAL).unwrap();
    let writer = SafeWriter::new(Settings::for_config(&config));
    (temp, config, writer)
}

fn backups_in(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn external_change_is_concurrent_modification() {
    let (temp, config, writer) = setup();
    let doc = writer.read().unwrap();

    let external = format!("{ORIGINAL}\nHost added-by-someone-else\n");
    fs::write(&config, &external).unwrap();

    let err = writer.update(&doc, doc.file_version()).unwrap_err();

    match err {
        Error::ConcurrentModification {
            path,
            expected,
            actual,
        } => {
            assert_eq!(path, config);
            assert_eq!(expected, doc.file_version());
            assert_eq!(actual, sshcm_fs::hash_bytes(external.as_bytes()));
        }
        other => panic!("expected ConcurrentModification, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&config).unwrap(), external);
    assert!(backups_in(&temp.path().join("sshcm_backups")).is_empty());
}

#[test]
fn failed_target_write_leaves_complete_backup_and_original() {
    let (temp, config, writer) = setup();
    let mut doc = writer.read().unwrap();
    doc.add_host(HostRecord::new(HostFields::new("new")).unwrap());

    // Occupy the staging path so the replace step cannot open it.
    let staging = io::staging_path(&config);
    fs::create_dir(&staging).unwrap();

    let err = writer.update(&doc, doc.file_version()).unwrap_err();
    fs::remove_dir(&staging).unwrap();

    assert!(
        matches!(err, Error::TargetWriteFailed { .. }),
        "expected TargetWriteFailed, got {err:?}"
    );
    assert_eq!(fs::read_to_string(&config).unwrap(), ORIGINAL);

    let backups = backups_in(&temp.path().join("sshcm_backups"));
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), ORIGINAL);
}

#[test]
fn failed_backup_leaves_target_untouched() {
    let (temp, config, _) = setup();
    let blocked = temp.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();
    let writer = SafeWriter::new(Settings::for_config(&config).with_backup_dir(&blocked));
    let mut doc = writer.read().unwrap();
    doc.add_host(HostRecord::new(HostFields::new("new")).unwrap());

    let err = writer.update(&doc, doc.file_version()).unwrap_err();

    assert!(
        matches!(err, Error::BackupWriteFailed { .. }),
        "expected BackupWriteFailed, got {err:?}"
    );
    assert_eq!(fs::read_to_string(&config).unwrap(), ORIGINAL);
}

#[test]
fn missing_config_is_source_unavailable() {
    let temp = TempDir::new().unwrap();
    let writer = SafeWriter::new(Settings::for_config(temp.path().join("absent")));

    assert!(matches!(
        writer.read().unwrap_err(),
        Error::SourceUnavailable { .. }
    ));
}

#[test]
fn update_host_keeps_unrelated_external_edits() {
    let (_temp, config, writer) = setup();
    let doc = writer.read().unwrap();
    let work = doc.find_by_name("work").unwrap();

    // Someone edits the other host after we read.
    fs::write(&config, ORIGINAL.replace("User me", "User someone")).unwrap();

    let mut fields = work.fields();
    fields.port = Some("22".into());
    writer
        .update_host(work.identity(), HostRecord::new(fields).unwrap())
        .unwrap();

    let after = writer.read().unwrap();
    assert_eq!(after.find_by_name("home").unwrap().user(), Some("someone"));
    assert_eq!(after.find_by_name("work").unwrap().port(), Some("22"));
}

#[test]
fn update_host_rejects_externally_changed_record() {
    let (_temp, config, writer) = setup();
    let doc = writer.read().unwrap();
    let work = doc.find_by_name("work").unwrap();

    let external = ORIGINAL.replace("Port 2200", "Port 2201");
    fs::write(&config, &external).unwrap();

    let err = writer
        .update_host(work.identity(), HostRecord::new(work.fields()).unwrap())
        .unwrap_err();

    assert!(matches!(err, Error::StaleRecord { .. }));
    assert_eq!(fs::read_to_string(&config).unwrap(), external);
}

#[test]
fn remove_and_add_host() {
    let (_temp, _config, writer) = setup();
    let doc = writer.read().unwrap();
    let home_id = doc.find_by_name("home").unwrap().identity().to_string();

    writer.remove_host(&home_id).unwrap();
    writer
        .add_host(
            HostRecord::new(HostFields {
                user: Some("git".into()),
                ..HostFields::new("github.com")
            })
            .unwrap(),
        )
        .unwrap();

    let after = writer.read().unwrap();
    assert_eq!(after.host_names(), vec!["work", "github.com"]);
}

#[test]
fn each_write_gets_its_own_backup() {
    let (temp, _config, writer) = setup();

    for _ in 0..3 {
        let doc = writer.read().unwrap();
        writer.update(&doc, doc.file_version()).unwrap();
    }

    assert_eq!(backups_in(&temp.path().join("sshcm_backups")).len(), 3);
}

#[test]
fn configured_indent_and_backup_dir() {
    let (temp, config, _) = setup();
    let backup_dir = temp.path().join("elsewhere");
    let writer = SafeWriter::new(
        Settings::for_config(&config)
            .with_backup_dir(&backup_dir)
            .with_indent("    "),
    );
    let doc = writer.read().unwrap();

    let backup = writer.update(&doc, doc.file_version()).unwrap();

    assert!(backup.starts_with(&backup_dir));
    assert!(
        fs::read_to_string(&config)
            .unwrap()
            .contains("\n    HostName work.example.com\n")
    );
}

#[test]
fn invalid_indent_is_refused_before_any_write() {
    let (temp, config, _) = setup();
    let writer = SafeWriter::new(Settings::for_config(&config).with_indent("#"));
    let doc = writer.read().unwrap();

    let err = writer.update(&doc, doc.file_version()).unwrap_err();

    assert!(
        matches!(err, Error::Fs(sshcm_fs::Error::InvalidSettings { .. })),
        "expected InvalidSettings, got {err:?}"
    );
    assert_eq!(fs::read_to_string(&config).unwrap(), ORIGINAL);
    assert!(backups_in(&temp.path().join("sshcm_backups")).is_empty());
}

#[cfg(unix)]
#[test]
fn update_through_symlinked_config_keeps_the_link() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("dotfiles_config");
    let link = temp.path().join("config");
    fs::write(&real, ORIGINAL).unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();
    let writer = SafeWriter::new(Settings::for_config(&link));

    let mut doc = writer.read().unwrap();
    doc.add_host(HostRecord::new(HostFields::new("b")).unwrap());
    let backup = writer.update(&doc, doc.file_version()).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), real);
    let written = fs::read_to_string(&real).unwrap();
    assert!(written.ends_with("\n\nHost b\n"), "got {written:?}");
    assert_eq!(fs::read_to_string(&link).unwrap(), written);
    assert_eq!(fs::read_to_string(&backup).unwrap(), ORIGINAL);
    assert!(backup.starts_with(temp.path().join("sshcm_backups")));
}
