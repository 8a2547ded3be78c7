//! Test fixtures for tree-update tests
//!
//! Builds a small CHAT corpus in a temporary directory:
//!
//! ```text
//! old/
//!   top.cha                  no override here, left alone
//!   side/side.cha            no override here, left alone
//!   sub0/0types.txt          @Types:	top1, top2, top3
//!   sub0/*.cha               eight files, every one needs a change
//!   sub0/notes.txt           not a target
//!   sub0/sub1/deep.cha       no override of its own, left alone
//!   .git/0types.txt          malformed, but never visited
//!   .git/hooks/stale.cha     never visited
//! ```

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub const TOP_HEADER: &str = "@Types:\ttop1, top2, top3";

/// A target file under `sub0` with its contents before and after an update
pub struct Case {
    pub name: &'static str,
    pub before: &'static str,
    pub after: &'static str,
}

pub const SUB0_CASES: &[Case] = &[
    Case {
        name: "a_insert.cha",
        before: "@UTF8\n@Begin\n@Languages:\teng\n@Comment:\tcomment\n*CHI:\tword .\n*CHI:\tword word .\n@End\n",
        after: "@UTF8\n@Begin\n@Languages:\teng\n@Comment:\tcomment\n@Types:\ttop1, top2, top3\n*CHI:\tword .\n*CHI:\tword word .\n@End\n",
    },
    Case {
        name: "b_insert.cha",
        before: "*MOT:\tlook .\n@End\n",
        after: "@Types:\ttop1, top2, top3\n*MOT:\tlook .\n@End\n",
    },
    Case {
        name: "c_insert.cha",
        before: "@Begin\n@Comment:\tused to be  @Types:\tx, y, z\n*CHI:\tno .\n%mor:\tco|no .\n*MOT:\tyes .\n@End\n",
        after: "@Begin\n@Comment:\tused to be  @Types:\tx, y, z\n@Types:\ttop1, top2, top3\n*CHI:\tno .\n%mor:\tco|no .\n*MOT:\tyes .\n@End\n",
    },
    Case {
        name: "d_insert.cha",
        before: "@Begin\r\n@Participants:\tCHI Target_Child\r\n*CHI:\tmore .\r\n@End\r\n",
        after: "@Begin\r\n@Participants:\tCHI Target_Child\r\n@Types:\ttop1, top2, top3\r\n*CHI:\tmore .\r\n@End\r\n",
    },
    Case {
        name: "e_replace.cha",
        before: "@Begin\n@Comment:\tcomment\n@Types:\told1, old2, old3\n*CHI:\tword .\n*CHI:\tword word .\n@End\n",
        after: "@Begin\n@Comment:\tcomment\n@Types:\ttop1, top2, top3\n*CHI:\tword .\n*CHI:\tword word .\n@End\n",
    },
    Case {
        name: "f_replace.cha",
        before: "@Begin\n@Types:\told1, old2, old3\n*CHI:\thi .\n@Types:\tstray\n@End\n",
        after: "@Begin\n@Types:\ttop1, top2, top3\n*CHI:\thi .\n@Types:\ttop1, top2, top3\n@End\n",
    },
    Case {
        name: "g_replace.cha",
        before: "@Begin\r\n@Types:\tlong, toyplay, TD\r\n*CHI:\tball .\r\n@End\r\n",
        after: "@Begin\r\n@Types:\ttop1, top2, top3\r\n*CHI:\tball .\r\n@End\r\n",
    },
    Case {
        name: "h_replace.cha",
        before: "@Begin\n@Types:\n@End\n",
        after: "@Begin\n@Types:\ttop1, top2, top3\n@End\n",
    },
];

/// Files outside any owned directory, or not targets at all
pub const UNTOUCHED: &[(&str, &str)] = &[
    ("top.cha", "@Begin\n*CHI:\ttop level .\n@End\n"),
    ("side/side.cha", "@Begin\n@Types:\tside1, side2, side3\n*CHI:\tside .\n@End\n"),
    ("sub0/notes.txt", "*not a transcript\n"),
    ("sub0/sub1/deep.cha", "@Begin\n*CHI:\tdeep .\n@End\n"),
    (".git/0types.txt", "this is not a types line\n"),
    (".git/hooks/stale.cha", "@Begin\n*CHI:\tstale .\n@End\n"),
];

/// A corpus in a temp dir; removed on drop
pub struct Corpus {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl Corpus {
    /// Build the corpus described in the module docs
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("old");

        write(&root.join("sub0/0types.txt"), &format!("{}\n", TOP_HEADER));
        for case in SUB0_CASES {
            write(&root.join("sub0").join(case.name), case.before);
        }
        for (rel, contents) in UNTOUCHED {
            write(&root.join(rel), contents);
        }

        Self { _tmp: tmp, root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        write(&self.path(rel), contents);
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("read fixture file")
    }

    /// Every file under the root with its bytes, keyed by relative path
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        snapshot(&self.root)
    }
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, contents).expect("write fixture file");
}

/// Every file under `root` with its bytes, keyed by path relative to `root`
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.expect("walk fixture tree"))
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).expect("under root").to_path_buf();
            let bytes = fs::read(e.path()).expect("read fixture file");
            (rel, bytes)
        })
        .collect()
}
