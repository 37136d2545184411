use archivist_core::{
    AssetMover, MoveOutcome, MoveStage, MovementLog, ScriptedProvider, VaultConfig,
};
use std::fs;
use std::path::Path;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

struct Fixture {
    _dir: tempfile::TempDir,
    config: VaultConfig,
    log: MovementLog,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let vault = dir.path().join("vault");
    fs::create_dir_all(vault.join("04_archive")).unwrap();
    fs::create_dir_all(vault.join("03_references")).unwrap();
    let log_path = dir.path().join("movement_history.txt");
    let config = VaultConfig::new(&vault).with_movement_log_path(&log_path);
    let log = MovementLog::new(&log_path);
    Fixture {
        _dir: dir,
        config,
        log,
    }
}

#[test]
fn default_choice_moves_asset_next_to_note_and_logs_it() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("2024/trip.md");
    write(&note, "![[photo.jpg]]");
    let source = fx.config.references_dir.join("assets/photo.jpg");
    write(&source, "jpeg");

    let mut provider = ScriptedProvider::new([""]);
    let outcome = AssetMover::new(&fx.config, &fx.log).move_asset(&mut provider, "photo.jpg", &note);

    let destination = fx.config.archive_dir.join("2024/photo.jpg");
    match outcome {
        MoveOutcome::Moved { record, log_error } => {
            assert_eq!(record.source, source);
            assert_eq!(record.destination, destination);
            assert_eq!(log_error, None);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!source.exists());
    assert_eq!(fs::read_to_string(&destination).unwrap(), "jpeg");

    let log = fs::read_to_string(fx.log.path()).unwrap();
    assert_eq!(log.matches(" - Moved: photo.jpg").count(), 1);
    assert!(log.contains(&format!(
        "Rollback command: mv {} {}",
        destination.display(),
        source.display()
    )));
}

#[test]
fn existing_destination_is_never_overwritten_or_logged() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("note.md");
    write(&note, "[[doc.pdf]]");
    let source = fx.config.references_dir.join("doc.pdf");
    write(&source, "incoming");
    let occupied = fx.config.archive_dir.join("doc.pdf");
    write(&occupied, "original");

    let mut provider = ScriptedProvider::new(["0"]);
    let outcome = AssetMover::new(&fx.config, &fx.log).move_asset(&mut provider, "doc.pdf", &note);

    assert_eq!(
        outcome,
        MoveOutcome::Collision {
            destination: occupied.clone()
        }
    );
    assert_eq!(fs::read_to_string(&occupied).unwrap(), "original");
    assert_eq!(fs::read_to_string(&source).unwrap(), "incoming");
    assert!(!fx.log.path().exists());
}

#[test]
fn missing_asset_is_reported_without_prompting() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("note.md");
    write(&note, "[[ghost.png]]");

    let mut provider = ScriptedProvider::new(["should stay unused"]);
    let outcome = AssetMover::new(&fx.config, &fx.log).move_asset(&mut provider, "ghost.png", &note);

    assert_eq!(
        outcome,
        MoveOutcome::NotFound {
            file_name: "ghost.png".to_string()
        }
    );
    assert_eq!(provider.remaining_answers(), 1);
}

#[test]
fn asset_in_archive_root_is_found_when_references_lack_it() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("projects/plan.md");
    write(&note, "[[chart.svg]]");
    let source = fx.config.archive_dir.join("chart.svg");
    write(&source, "<svg/>");
    // Only the archive root is checked, not its subfolders.
    write(&fx.config.archive_dir.join("other/nested.svg"), "x");

    let mover = AssetMover::new(&fx.config, &fx.log);
    assert_eq!(mover.locate_asset("chart.svg"), Some(source.clone()));
    assert_eq!(mover.locate_asset("nested.svg"), None);

    let mut provider = ScriptedProvider::new([""]);
    let outcome = mover.move_asset(&mut provider, "chart.svg", &note);
    assert!(outcome.is_moved());
    assert!(fx.config.archive_dir.join("projects/chart.svg").exists());
}

#[test]
fn menu_candidate_and_manual_path_override_default() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("a/note.md");
    write(&note, "");
    fs::create_dir_all(fx.config.archive_dir.join("b")).unwrap();
    write(&fx.config.references_dir.join("one.png"), "1");
    write(&fx.config.references_dir.join("two.png"), "2");
    let mover = AssetMover::new(&fx.config, &fx.log);

    // Candidates are sorted: [1] a, [2] b.
    let mut provider = ScriptedProvider::new(["2"]);
    assert!(mover.move_asset(&mut provider, "one.png", &note).is_moved());
    assert!(fx.config.archive_dir.join("b/one.png").exists());

    let manual = fx.config.archive_dir.join("fresh/deep");
    let mut provider = ScriptedProvider::new([manual.to_string_lossy().into_owned()]);
    assert!(mover.move_asset(&mut provider, "two.png", &note).is_moved());
    assert!(manual.join("two.png").exists());

    let log = fs::read_to_string(fx.log.path()).unwrap();
    assert_eq!(log.matches(" - Moved: ").count(), 2);
}

#[test]
fn closed_input_aborts_only_this_asset() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("note.md");
    write(&note, "");
    let source = fx.config.references_dir.join("img.png");
    write(&source, "x");

    let mut provider = ScriptedProvider::new(Vec::<String>::new());
    let outcome = AssetMover::new(&fx.config, &fx.log).move_asset(&mut provider, "img.png", &note);

    assert!(matches!(
        outcome,
        MoveOutcome::IoError {
            stage: MoveStage::Prompt,
            ..
        }
    ));
    assert!(source.exists());
}

#[test]
fn destination_folder_that_is_a_file_is_an_io_error() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("note.md");
    write(&note, "");
    write(&fx.config.references_dir.join("img.png"), "x");
    let blocker = fx.config.archive_dir.join("blocker");
    write(&blocker, "not a dir");

    let answer = blocker.join("sub").to_string_lossy().into_owned();
    let mut provider = ScriptedProvider::new([answer]);
    let outcome = AssetMover::new(&fx.config, &fx.log).move_asset(&mut provider, "img.png", &note);

    assert!(matches!(
        outcome,
        MoveOutcome::IoError {
            stage: MoveStage::CreateDirectory,
            ..
        }
    ));
    assert!(!fx.log.path().exists());
}

#[test]
fn failed_log_write_keeps_the_move() {
    let fx = fixture();
    let note = fx.config.archive_dir.join("note.md");
    write(&note, "");
    write(&fx.config.references_dir.join("img.png"), "x");
    let broken_log = MovementLog::new(fx.config.vault_root.join("no/such/dir/log.txt"));

    let mut provider = ScriptedProvider::new([""]);
    let outcome =
        AssetMover::new(&fx.config, &broken_log).move_asset(&mut provider, "img.png", &note);

    match outcome {
        MoveOutcome::Moved { log_error, .. } => assert!(log_error.is_some()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(fx.config.archive_dir.join("img.png").exists());
}
