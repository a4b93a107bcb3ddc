use std::path::{Path, PathBuf};

use assert_cmd::Command;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use predicates::prelude::*;
use tempfile::TempDir;

fn write_wav(dir: &Path, name: &str, rate: u32, channels: u16, seconds: f64) -> PathBuf {
    let path = dir.join(name);
    let spec = WavSpec {
        channels,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for i in 0..(rate as f64 * seconds) as usize {
        for c in 0..channels {
            writer.write_sample(((i * 37 + c as usize) % 2000) as i16 - 1000).unwrap();
        }
    }
    writer.finalize().unwrap();
    path
}

fn populate(dir: &Path) {
    // 62.5 KB, 43.07 KB and 1.56 KB
    write_wav(dir, "big.wav", 8000, 2, 2.0);
    write_wav(dir, "mid.WAV", 22050, 1, 1.0);
    write_wav(dir, "tiny.wav", 8000, 1, 0.1);
    std::fs::write(dir.join("corrupt.wav"), b"this is not audio").unwrap();
    std::fs::write(dir.join("notes.txt"), b"keep me").unwrap();
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.join("Compressed_WAVs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn wav() -> Command {
    Command::cargo_bin("wav-shrink").unwrap()
}

#[test]
fn parallel_run_compresses_oversized_files() {
    let dir = TempDir::new().unwrap();
    populate(dir.path());

    wav()
        .arg(dir.path())
        .arg("0.03")
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 4 WAV files for processing."))
        .stderr(predicate::str::contains("Skipping"))
        .stderr(predicate::str::contains("ERROR - Error processing"))
        .stderr(predicate::str::contains("4 files: 2 compressed, 1 skipped, 1 failed"));

    assert_eq!(output_names(dir.path()), vec!["big_compressed.wav", "mid_compressed.wav"]);

    // 30.72 KB target: floor(8000 * (30.72 / 62.5) * 0.95) = 3735 Hz
    let reader = WavReader::open(dir.path().join("Compressed_WAVs/big_compressed.wav")).unwrap();
    assert_eq!(reader.spec().sample_rate, 3735);
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().bits_per_sample, 16);

    assert_eq!(std::fs::read(dir.path().join("notes.txt")).unwrap(), b"keep me");
}

#[test]
fn serial_run_matches_parallel_run() {
    let serial_dir = TempDir::new().unwrap();
    let parallel_dir = TempDir::new().unwrap();
    populate(serial_dir.path());
    populate(parallel_dir.path());

    wav().arg(serial_dir.path()).arg("0.03").arg("--serial").assert().success();
    wav().arg(parallel_dir.path()).arg("0.03").args(["--workers", "2"]).assert().success();

    for name in ["big_compressed.wav", "mid_compressed.wav"] {
        let a = std::fs::read(serial_dir.path().join("Compressed_WAVs").join(name)).unwrap();
        let b = std::fs::read(parallel_dir.path().join("Compressed_WAVs").join(name)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn files_under_target_are_left_alone_on_repeat_runs() {
    let dir = TempDir::new().unwrap();
    write_wav(dir.path(), "a.wav", 44100, 2, 0.5);
    write_wav(dir.path(), "b.wav", 8000, 1, 1.0);

    for _ in 0..2 {
        wav()
            .arg(dir.path())
            .arg("5")
            .assert()
            .success()
            .stderr(predicate::str::contains("2 files: 0 compressed, 2 skipped, 0 failed"));
        assert!(output_names(dir.path()).is_empty());
    }
}

#[test]
fn empty_directory_still_creates_output_directory() {
    let dir = TempDir::new().unwrap();
    wav().arg(dir.path()).arg("1").arg("-s").assert().success();
    assert!(dir.path().join("Compressed_WAVs").is_dir());
}

#[test]
fn missing_arguments_fail() {
    wav().assert().failure().stderr(predicate::str::contains("Usage"));

    let dir = TempDir::new().unwrap();
    wav().arg(dir.path()).assert().failure();
    wav().arg(dir.path()).arg("lots").assert().failure();
}

#[test]
fn missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");

    wav()
        .arg(&missing)
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input directory does not exist"));
    assert!(!missing.exists());
}

#[test]
fn config_file_changes_suffix() {
    let dir = TempDir::new().unwrap();
    write_wav(dir.path(), "voice.wav", 8000, 1, 2.0);
    let config = dir.path().join("shrink.toml");
    std::fs::write(&config, "[compression]\noutput_suffix = \"_small\"\n").unwrap();

    wav()
        .arg(dir.path())
        .arg("0.01")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    assert_eq!(output_names(dir.path()), vec!["voice_small.wav"]);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[compression]\nsafety_factor = 2.0\n").unwrap();

    wav()
        .arg(dir.path())
        .arg("1")
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Safety factor"));
}

#[test]
fn case_variants_do_not_overwrite_each_other() {
    for mode in ["--serial", "--workers=4"] {
        let dir = TempDir::new().unwrap();
        write_wav(dir.path(), "a.wav", 8000, 2, 3.0);
        write_wav(dir.path(), "a.WAV", 16000, 1, 1.0);

        wav()
            .arg(dir.path())
            .arg("0.01")
            .arg(mode)
            .assert()
            .success()
            .stderr(predicate::str::contains("already claimed by another input"))
            .stderr(predicate::str::contains("2 files: 1 compressed, 0 skipped, 1 failed"));

        assert_eq!(output_names(dir.path()), vec!["a_compressed.wav"]);
        let reader = WavReader::open(dir.path().join("Compressed_WAVs/a_compressed.wav")).unwrap();
        assert_eq!(reader.spec().channels, 1);
    }
}
