//! The diagnostic log is the one resource shared between parallel runs;
//! concurrent appends must land as whole lines, never interleaved.

use std::fs;
use std::sync::Arc;
use std::thread;

use xmlpipe::{DiagnosticSink, FileLog};

#[test]
fn test_concurrent_appends_never_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs.txt");
    let log = Arc::new(FileLog::open(&path).unwrap());

    const THREADS: usize = 8;
    const APPENDS: usize = 50;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..APPENDS {
                    log.append(&format!("worker {} message {} end", t, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * APPENDS);

    for line in &lines {
        // timestamp prefix, then the message, intact to its last token
        let (stamp, message) = line.split_once(' ').unwrap();
        assert_eq!(stamp.len(), 16, "malformed timestamp in line {:?}", line);
        assert!(message.starts_with("worker "), "torn line {:?}", line);
        assert!(message.ends_with(" end"), "torn line {:?}", line);
    }
}

#[test]
fn test_appends_from_two_handles_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs.txt");

    let a = FileLog::open(&path).unwrap();
    let b = FileLog::open(&path).unwrap();
    a.append("from a").unwrap();
    b.append("from b").unwrap();
    a.append("from a again").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
}
