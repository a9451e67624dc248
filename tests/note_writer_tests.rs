// Integration tests for the vault note writer.

use anyhow::Result;
use voice_notes::NoteWriter;

#[test]
fn save_creates_vault_and_writes_note() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let vault = dir.path().join("Wiser").join("Voice Notes");
    let writer = NoteWriter::new(&vault, "llama3.1:latest");

    let path = writer.save(
        "## Key Points\n- x",
        "the raw transcript text",
        2.5,
    )?;

    assert!(vault.is_dir());
    assert!(path.exists());

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("-meeting-notes.md"));
    // YYYY-MM-DD-HHMM prefix
    assert_eq!(name.len(), "2025-01-01-0000-meeting-notes.md".len());

    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains("## Key Points\n- x"));
    assert!(content.contains("> Duration: 2.5s | Transcribed with Whisper + llama3.1:latest"));
    assert!(content.contains("<summary>Raw Transcript</summary>"));
    assert!(content.contains("the raw transcript text"));
    Ok(())
}

#[test]
fn same_minute_save_overwrites_previous_note() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let writer = NoteWriter::new(dir.path(), "llama3.1:latest");

    let first = writer.save("first body", "first transcript", 1.0)?;
    let second = writer.save("second body", "second transcript", 2.0)?;

    // Same clock minute means the same filename; last writer wins. This is
    // the documented behavior, not an accident.
    if first == second {
        let content = std::fs::read_to_string(&second)?;
        assert!(content.contains("second body"));
        assert!(!content.contains("first body"));
        let entries = std::fs::read_dir(dir.path())?.count();
        assert_eq!(entries, 1);
    }
    Ok(())
}
