use sshcfg::ssh_config::{parse_all, serialize_all};
use sshcfg::{ConfigStore, Error, HostManager, HostRecord, NewHost};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, HostManager) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config");
    fs::write(&path, "").unwrap();
    let manager = HostManager::new(ConfigStore::new(path));
    (dir, manager)
}

#[test]
fn test_add_then_list_from_empty_store() {
    let (_dir, manager) = setup();

    manager
        .add(NewHost::new("db", "10.0.0.5").user("admin").port("2222"), false)
        .unwrap();

    let records = manager.list().unwrap();
    assert_eq!(
        records,
        vec![HostRecord {
            host: "db".to_string(),
            hostname: "10.0.0.5".to_string(),
            user: Some("admin".to_string()),
            port: Some("2222".to_string()),
            identity_file: None,
        }]
    );
    assert_eq!(
        fs::read_to_string(manager.store().path()).unwrap(),
        "Host db\n  HostName 10.0.0.5\n  User admin\n  Port 2222\n\n"
    );
}

#[test]
fn test_defaults_for_omitted_fields() {
    let (_dir, manager) = setup();
    let record = manager.add(NewHost::new("box", "1.2.3.4"), false).unwrap();

    assert_eq!(record.user.as_deref(), Some("root"));
    assert_eq!(record.port.as_deref(), Some("22"));
    assert_eq!(manager.find_by_host("box").unwrap(), Some(record));
}

#[test]
fn test_duplicate_add_keeps_original() {
    let (_dir, manager) = setup();
    manager.add(NewHost::new("db", "10.0.0.5"), false).unwrap();

    let err = manager
        .add(NewHost::new("db", "10.0.0.9").user("other"), false)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateHost(_)));

    let record = manager.find_by_host("db").unwrap().unwrap();
    assert_eq!(record.hostname, "10.0.0.5");
    assert_eq!(record.user.as_deref(), Some("root"));
}

#[test]
fn test_file_is_sorted_but_list_is_file_order() {
    let (_dir, manager) = setup();
    manager.add(NewHost::new("zeta", "z.example"), false).unwrap();
    manager.add(NewHost::new("alpha", "a.example"), false).unwrap();

    let content = fs::read_to_string(manager.store().path()).unwrap();
    let alpha = content.find("Host alpha").unwrap();
    let zeta = content.find("Host zeta").unwrap();
    assert!(alpha < zeta);

    // Hand-edited, unsorted file: list keeps the order as written
    fs::write(
        manager.store().path(),
        "Host zeta\n  HostName z.example\n\nHost alpha\n  HostName a.example\n",
    )
    .unwrap();
    let hosts: Vec<String> = manager.list().unwrap().into_iter().map(|r| r.host).collect();
    assert_eq!(hosts, vec!["zeta", "alpha"]);
}

#[test]
fn test_delete_then_find() {
    let (_dir, manager) = setup();
    manager.add(NewHost::new("db", "10.0.0.5"), false).unwrap();
    manager.add(NewHost::new("web", "10.0.0.6"), false).unwrap();

    manager.delete("db").unwrap();
    assert!(manager.find_by_host("db").unwrap().is_none());
    assert!(manager.find_by_host("web").unwrap().is_some());

    let before = fs::read_to_string(manager.store().path()).unwrap();
    assert_eq!(manager.delete("db").unwrap(), 0);
    assert_eq!(fs::read_to_string(manager.store().path()).unwrap(), before);
}

#[test]
fn test_foreign_config_survives_as_partial_records() {
    let (_dir, manager) = setup();
    fs::write(
        manager.store().path(),
        "# managed elsewhere\nInclude ~/.ssh/extra\n\n\
         Host github.com\n    HostName github.com\n    User git\n    IdentityFile ~/.ssh/gh\n    IdentitiesOnly yes\n\n\
         Host *\n    ServerAliveInterval 60\n",
    )
    .unwrap();

    let records = manager.list().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].identity_file.as_deref(), Some("~/.ssh/gh"));
    assert_eq!(records[1].host, "*");
    assert_eq!(records[1].hostname, "");

    // Rewriting drops what is not modelled and stays parseable
    manager.add(NewHost::new("box", "1.2.3.4"), false).unwrap();
    let content = fs::read_to_string(manager.store().path()).unwrap();
    assert!(!content.contains("Include"));
    assert!(content.starts_with("Host *\n\nHost box\n"));
    assert_eq!(parse_all(&content).len(), 3);
}

#[test]
fn test_serialize_is_stable_across_rewrites() {
    let (_dir, manager) = setup();
    manager
        .add(NewHost::new("web", "example.com").identity_file("~/.ssh/web"), false)
        .unwrap();
    manager.add(NewHost::new("api", "10.2.0.1").port("8022"), false).unwrap();

    let first = fs::read_to_string(manager.store().path()).unwrap();
    let records = manager.list().unwrap();
    assert_eq!(serialize_all(&records), first);

    manager.store().write_all(&records).unwrap();
    assert_eq!(fs::read_to_string(manager.store().path()).unwrap(), first);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let manager = HostManager::new(ConfigStore::new(dir.path().join("config")));

    assert!(matches!(manager.list(), Err(Error::Io { .. })));
    assert!(matches!(
        manager.add(NewHost::new("db", "10.0.0.5"), false),
        Err(Error::Io { .. })
    ));
    assert!(!dir.path().join("config").exists());
}
