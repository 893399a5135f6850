use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;

use ddb_local::install::archive::unpack_tar_gz;

/// Build a tar.gz archive in memory from (path, contents) pairs.
fn build_tar_gz(entries: &[(&str, &[u8])]) -> Bytes {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, *data).unwrap();
    }

    let encoder = builder.into_inner().unwrap();
    Bytes::from(encoder.finish().unwrap())
}

#[tokio::test]
async fn test_unpack_tar_gz() {
    let dir = tempfile::tempdir().unwrap();
    let archive = build_tar_gz(&[
        ("DynamoDBLocal.jar", b"not really a jar".as_slice()),
        ("DynamoDBLocal_lib/libsqlite4java.so", b"\x7fELF".as_slice()),
    ]);

    unpack_tar_gz(archive, dir.path()).await.unwrap();

    let jar = dir.path().join("DynamoDBLocal.jar");
    assert_eq!(std::fs::read(jar).unwrap(), b"not really a jar");
    assert!(dir.path().join("DynamoDBLocal_lib/libsqlite4java.so").exists());
}

#[tokio::test]
async fn test_unpack_rejects_non_gzip() {
    let dir = tempfile::tempdir().unwrap();
    let err = unpack_tar_gz(Bytes::from_static(b"<html>not found</html>"), dir.path())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not gzip"));
}

#[tokio::test]
async fn test_unpack_empty_archive_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let archive = build_tar_gz(&[]);
    unpack_tar_gz(archive, dir.path()).await.unwrap();
}
