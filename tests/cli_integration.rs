//! Integration tests for the FieldSeal CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  Each
//! test runs in a temp dir holding a `.fieldseal.toml` with cheap Argon2
//! params, and passes the passphrase through the environment.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const FAST_CONFIG: &str = r#"argon2_memory_kib = 8192
argon2_iterations = 1
argon2_parallelism = 1
"#;

/// Helper: get a Command pointing at the fieldseal binary.
fn fieldseal() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("fieldseal").expect("binary should exist")
}

/// Helper: a temp project dir with fast settings, and a command bound to it.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".fieldseal.toml").write_str(FAST_CONFIG).unwrap();
    tmp
}

fn in_project(tmp: &TempDir) -> Command {
    let mut cmd = fieldseal();
    cmd.current_dir(tmp.path())
        .env("FIELDSEAL_PASSPHRASE", "integration test passphrase")
        .env_remove("FIELDSEAL_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn encrypt(tmp: &TempDir, text: &str) -> String {
    let out = in_project(tmp)
        .args(["encrypt", text])
        .output()
        .expect("run encrypt");
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

#[test]
fn help_flag_shows_usage() {
    fieldseal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Field-level encryption for medical records",
        ))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("reveal"))
        .stdout(predicate::str::contains("seal-file"))
        .stdout(predicate::str::contains("open-file"))
        .stdout(predicate::str::contains("seal-record"))
        .stdout(predicate::str::contains("open-record"))
        .stdout(predicate::str::contains("fingerprint"));
}

#[test]
fn version_flag_shows_version() {
    fieldseal()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldseal"));
}

#[test]
fn no_args_shows_help() {
    fieldseal()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn encrypt_then_decrypt() {
    let tmp = project();
    let hex = encrypt(&tmp, "João Silva");
    assert_eq!(hex.len(), 2 * (16 + "João Silva".len()));

    in_project(&tmp)
        .args(["decrypt", &hex])
        .assert()
        .success()
        .stdout("João Silva\n");
}

#[test]
fn encrypt_reads_piped_stdin() {
    let tmp = project();
    let out = in_project(&tmp)
        .arg("encrypt")
        .write_stdin("Alergia a penicilina\n")
        .output()
        .unwrap();
    assert!(out.status.success());
    let hex = String::from_utf8(out.stdout).unwrap();

    in_project(&tmp)
        .args(["decrypt", hex.trim()])
        .assert()
        .success()
        .stdout("Alergia a penicilina\n");
}

#[test]
fn decrypt_rejects_malformed_hex() {
    let tmp = project();
    in_project(&tmp)
        .args(["decrypt", "zz-not-hex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid hex"));
}

#[test]
fn decrypt_rejects_short_payload() {
    let tmp = project();
    in_project(&tmp)
        .args(["decrypt", "abcd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too short"));
}

#[test]
fn reveal_passes_plaintext_through() {
    let tmp = project();
    in_project(&tmp)
        .args(["reveal", "Maria Oliveira"])
        .assert()
        .success()
        .stdout("Maria Oliveira\n")
        .stderr(predicate::str::contains("not encrypted"));
}

#[test]
fn reveal_decrypts_encrypted_value() {
    let tmp = project();
    let hex = encrypt(&tmp, "Hipotireoidismo");
    in_project(&tmp)
        .args(["reveal", &hex])
        .assert()
        .success()
        .stdout("Hipotireoidismo\n");
}

#[test]
fn different_passphrase_cannot_decrypt() {
    let tmp = project();
    let hex = encrypt(&tmp, "Hipotireoidismo");
    in_project(&tmp)
        .env("FIELDSEAL_PASSPHRASE", "another passphrase")
        .args(["decrypt", &hex])
        .assert()
        .stdout(predicate::str::contains("Hipotireoidismo").not());
}

#[test]
fn missing_passphrase_warns_about_insecure_default() {
    let tmp = project();
    in_project(&tmp)
        .env_remove("FIELDSEAL_PASSPHRASE")
        .args(["encrypt", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("insecure"));
}

#[test]
fn explicit_config_flag_is_used() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.child("custom.toml");
    config
        .write_str(&format!("{FAST_CONFIG}passphrase_env = \"CLINIC_KEY\"\n"))
        .unwrap();

    fieldseal()
        .current_dir(tmp.path())
        .env("CLINIC_KEY", "clinic secret")
        .args(["--config", config.path().to_str().unwrap(), "encrypt", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("insecure").not());
}

#[test]
fn seal_file_then_open_file() {
    let tmp = project();
    let doc = tmp.child("hemograma.txt");
    doc.write_str("Leucocitos 7200/mm3").unwrap();

    in_project(&tmp)
        .args(["seal-file", "hemograma.txt", "-o", "hemograma.sealed.json"])
        .assert()
        .success();

    tmp.child("hemograma.sealed.json")
        .assert(predicate::str::contains("\"mime_type\": \"text/plain\""))
        .assert(predicate::str::contains("Leucocitos").not());

    in_project(&tmp)
        .args(["open-file", "hemograma.sealed.json", "-o", "restored.txt"])
        .assert()
        .success();
    tmp.child("restored.txt").assert("Leucocitos 7200/mm3");

    in_project(&tmp)
        .args(["open-file", "hemograma.sealed.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data:text/plain;base64,"));
}

#[test]
fn open_record_reads_mixed_values() {
    let tmp = project();
    let name = encrypt(&tmp, "Asma");
    tmp.child("condition.json")
        .write_str(&format!(
            r#"{{"id": 3, "name": "{name}", "code": "J45", "notes": null}}"#
        ))
        .unwrap();

    in_project(&tmp)
        .args(["open-record", "condition.json", "--kind", "condition"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Asma\""))
        .stdout(predicate::str::contains("\"code\": \"J45\""))
        .stderr(predicate::str::contains("plaintext"));
}

#[test]
fn seal_record_encrypts_listed_fields() {
    let tmp = project();
    in_project(&tmp)
        .args(["seal-record", "-", "--kind", "medication"])
        .write_stdin(r#"{"id": 9, "name": "Metformina", "dosage": "850mg"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Metformina").not())
        .stdout(predicate::str::contains("\"id\": 9"));
}

#[test]
fn seal_record_leaves_sealed_fields_alone() {
    let tmp = project();
    let name = encrypt(&tmp, "Metformina");
    tmp.child("medication.json")
        .write_str(&format!(r#"{{"name": "{name}", "dosage": "850mg"}}"#))
        .unwrap();

    in_project(&tmp)
        .args(["seal-record", "medication.json", "--kind", "medication"])
        .assert()
        .success()
        .stdout(predicate::str::contains(name.as_str()))
        .stdout(predicate::str::contains("850mg").not())
        .stderr(predicate::str::contains("already sealed"));
}

#[test]
fn seal_record_rejects_unknown_kind() {
    let tmp = project();
    in_project(&tmp)
        .args(["seal-record", "-", "--kind", "invoice"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown record kind"));
}

#[test]
fn fingerprint_check() {
    let tmp = project();
    let out = in_project(&tmp).arg("fingerprint").output().unwrap();
    assert!(out.status.success());
    let fp = String::from_utf8(out.stdout).unwrap();

    in_project(&tmp)
        .args(["fingerprint", "--check", fp.trim()])
        .assert()
        .success();

    in_project(&tmp)
        .env("FIELDSEAL_PASSPHRASE", "some other passphrase")
        .args(["fingerprint", "--check", fp.trim()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mismatch"));
}

#[test]
fn completions_for_bash() {
    fieldseal()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldseal"));
}
