use assert_cmd::Command;
use predicates::prelude::*;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

fn rkkit() -> Command {
    Command::cargo_bin("rkkit").expect("binary not built")
}

#[test]
fn mkdsk_and_catalog() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let img = dir.path().join("blank.rdi");
    rkkit()
        .arg("mkdsk")
        .arg("-d").arg(&img)
        .arg("-s").arg("4")
        .arg("-y")
        .assert()
        .success();
    rkkit()
        .arg("catalog")
        .arg("-d").arg(&img)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 file(s) total"))
        .stdout(predicate::str::contains("795 block(s) (407040 bytes) free"))
        .stdout(predicate::str::contains("92 directory entries free"));
    Ok(())
}

#[test]
fn put_get_round_trip() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let img = dir.path().join("files.rdi");
    let local = dir.path().join("test.bin");
    let extracted = dir.path().join("out.bin");
    std::fs::write(&local,[0x11,0x22,0x33,0x44])?;
    rkkit().arg("mkdsk").arg("-d").arg(&img).arg("-y").assert().success();
    rkkit()
        .arg("put")
        .arg("-f").arg(&local)
        .arg("-d").arg(&img)
        .arg("-a").arg("1000")
        .arg("-r")
        .assert()
        .success();
    rkkit()
        .arg("catalog")
        .arg("-d").arg(&img)
        .assert()
        .success()
        .stdout(predicate::str::contains("TEST.BIN"))
        .stdout(predicate::str::contains("1000"))
        .stdout(predicate::str::contains("1 file(s) total"));
    rkkit()
        .arg("get")
        .arg("-f").arg("test.bin")
        .arg("-d").arg(&img)
        .arg("-o").arg(&extracted)
        .assert()
        .success();
    assert_eq!(std::fs::read(&extracted)?,vec![0x11,0x22,0x33,0x44]);
    Ok(())
}

#[test]
fn delete_removes_the_file() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let img = dir.path().join("del.rdi");
    let local = dir.path().join("gone.bin");
    std::fs::write(&local,[1,2,3])?;
    rkkit().arg("mkdsk").arg("-d").arg(&img).arg("-y").assert().success();
    rkkit().arg("put").arg("-f").arg(&local).arg("-d").arg(&img).assert().success();
    rkkit()
        .arg("delete")
        .arg("-f").arg("gone.bin")
        .arg("-d").arg(&img)
        .assert()
        .success();
    rkkit()
        .arg("catalog")
        .arg("-d").arg(&img)
        .assert()
        .success()
        .stdout(predicate::str::contains("GONE.BIN").not())
        .stdout(predicate::str::contains("795 block(s)"));
    Ok(())
}

#[test]
fn missing_file_fails() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let img = dir.path().join("miss.rdi");
    rkkit().arg("mkdsk").arg("-d").arg(&img).arg("-y").assert().success();
    rkkit()
        .arg("get")
        .arg("-f").arg("ghost.bin")
        .arg("-d").arg(&img)
        .assert()
        .failure();
    Ok(())
}

#[test]
fn tape_rk_bytes() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("body.bin");
    let output = dir.path().join("body.rk");
    std::fs::write(&input,[0xAA,0xBB])?;
    rkkit()
        .arg("tape")
        .arg("-f").arg(&input)
        .arg("-a").arg("100")
        .arg("-o").arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("load address: 0100"));
    assert_eq!(std::fs::read(&output)?,hex::decode("01000101aabb0000e6aa65")?);
    Ok(())
}

#[test]
fn tape_rejects_oversize_input() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("huge.bin");
    std::fs::write(&input,vec![0;0x10001])?;
    rkkit()
        .arg("tape")
        .arg("-f").arg(&input)
        .arg("-o").arg(dir.path().join("huge.rk"))
        .assert()
        .failure();
    Ok(())
}
