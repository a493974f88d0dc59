use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn round_trip(contents: &[u8], workers: Option<&str>) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.bin");
    let cmp_path = temp_dir.path().join("input.zb");
    let out_path = temp_dir.path().join("output.bin");
    std::fs::write(&in_path, contents)?;

    let mut compress = Command::cargo_bin("zblock")?;
    compress.arg("compress").arg("-i").arg(&in_path).arg("-o").arg(&cmp_path);
    if let Some(w) = workers {
        compress.arg("-w").arg(w);
    }
    compress.assert().success();

    let mut decompress = Command::cargo_bin("zblock")?;
    decompress.arg("decompress").arg("-i").arg(&cmp_path).arg("-o").arg(&out_path);
    if let Some(w) = workers {
        decompress.arg("-w").arg(w);
    }
    decompress.assert().success();

    let round_tripped = std::fs::read(&out_path)?;
    assert_eq!(round_tripped, contents);
    Ok(())
}

#[test]
fn round_trips_ascii_text() -> STDRESULT {
    let text = "TOBEORNOTTOBEORTOBEORNOT".repeat(50);
    round_trip(text.as_bytes(), None)
}

#[test]
fn round_trips_empty_file() -> STDRESULT {
    round_trip(&[], None)
}

#[test]
fn round_trips_multi_block_input() -> STDRESULT {
    let mut state: u32 = 0xC0FFEE;
    let contents: Vec<u8> = (0..20_000)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        })
        .collect();
    round_trip(&contents, Some("1"))?;
    round_trip(&contents, Some("8"))
}

#[test]
fn round_trips_single_repeated_byte() -> STDRESULT {
    round_trip(&[b'Z'; 5000], None)
}

#[test]
fn compress_rejects_missing_input_file() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let missing = temp_dir.path().join("does-not-exist.bin");
    let out_path = temp_dir.path().join("out.zb");

    Command::cargo_bin("zblock")?
        .arg("compress")
        .arg("-i")
        .arg(&missing)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .failure();
    Ok(())
}

#[test]
fn decompress_rejects_corrupted_stream() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.bin");
    let cmp_path = temp_dir.path().join("input.zb");
    let out_path = temp_dir.path().join("output.bin");
    std::fs::write(&in_path, b"some plain content to compress")?;

    Command::cargo_bin("zblock")?
        .arg("compress")
        .arg("-i")
        .arg(&in_path)
        .arg("-o")
        .arg(&cmp_path)
        .assert()
        .success();

    let mut corrupted = std::fs::read(&cmp_path)?;
    if corrupted.len() > 2 {
        corrupted[2] = b'X';
    }
    std::fs::write(&cmp_path, &corrupted)?;

    Command::cargo_bin("zblock")?
        .arg("decompress")
        .arg("-i")
        .arg(&cmp_path)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CorruptedStream"));
    Ok(())
}

#[test]
fn help_mentions_compress_and_decompress() -> STDRESULT {
    Command::cargo_bin("zblock")?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compress").and(predicate::str::contains("decompress")));
    Ok(())
}
