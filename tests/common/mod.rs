//! In-memory filesystem access provider shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use unifs::{
    FileAttributes, FileTimes, FindData, FsError, FsRoot, FsSearch, FsTimes, NormalizedPath,
    SearchHandle, TimestampKind, Transaction, path_root, regular_path,
};

/// Time every node starts with.
pub fn epoch() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_600_000_000)
}

struct Node {
    name: String,
    attributes: FileAttributes,
    size: u64,
    created: SystemTime,
    accessed: SystemTime,
    modified: SystemTime,
    children: Vec<String>,
    /// Visible only inside this transaction.
    transaction: Option<Transaction>,
}

impl Node {
    fn visible_in(&self, transaction: Option<Transaction>) -> bool {
        self.transaction.is_none() || self.transaction == transaction
    }

    fn find_data(&self) -> FindData {
        FindData {
            name: self.name.clone(),
            attributes: self.attributes,
            size: self.size,
            created: self.created,
            accessed: self.accessed,
            modified: self.modified,
        }
    }
}

struct Search {
    dir: String,
    entries: VecDeque<FindData>,
    reads: usize,
    fail_read: Option<usize>,
}

/// Case-insensitive in-memory volume tree.
///
/// Children are listed in insertion order. Every `open_search` snapshots the
/// directory and prepends `.` and `..` records, like a real volume does.
pub struct MemoryProvider {
    nodes: RwLock<HashMap<String, Node>>,
    searches: Mutex<HashMap<u64, Search>>,
    next_handle: AtomicU64,
    next_transaction: AtomicU64,
    transactions: RwLock<HashSet<Transaction>>,
    denied: RwLock<HashSet<String>>,
    /// Directory -> read number (1-based, dot entries included) that fails.
    broken: RwLock<HashMap<String, usize>>,
    opens: AtomicUsize,
    closes: AtomicUsize,
    max_open: AtomicUsize,
    open_transactions: Mutex<Vec<Option<Transaction>>>,
}

fn key(path: &str) -> String {
    regular_path(path)
        .trim_end_matches('\\')
        .to_lowercase()
}

/// Split into (parent, name); `None` for a root.
fn split_parent(path: &str) -> Option<(String, String)> {
    let trimmed = path.trim_end_matches('\\');
    let root = path_root(trimmed)?;
    if key(trimmed) == key(&root) {
        return None;
    }
    let (parent, name) = trimmed.rsplit_once('\\')?;
    let parent = if key(parent) == key(&root) {
        root
    } else {
        parent.to_owned()
    };
    Some((parent, name.to_owned()))
}

impl MemoryProvider {
    /// A provider with an empty `C:\` volume.
    pub fn new() -> Self {
        let provider = Self {
            nodes: RwLock::new(HashMap::new()),
            searches: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
            next_transaction: AtomicU64::new(100),
            transactions: RwLock::new(HashSet::new()),
            denied: RwLock::new(HashSet::new()),
            broken: RwLock::new(HashMap::new()),
            opens: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            max_open: AtomicUsize::new(0),
            open_transactions: Mutex::new(Vec::new()),
        };
        provider.add_root(r"C:\");
        provider
    }

    /// Register a volume or share root.
    pub fn add_root(&self, root: &str) {
        self.nodes.write().unwrap().insert(
            key(root),
            Node {
                name: String::new(),
                attributes: FileAttributes::DIRECTORY,
                size: 0,
                created: epoch(),
                accessed: epoch(),
                modified: epoch(),
                children: Vec::new(),
                transaction: None,
            },
        );
    }

    fn insert(
        &self,
        path: &str,
        attributes: FileAttributes,
        size: u64,
        transaction: Option<Transaction>,
    ) {
        let (parent, name) = split_parent(path).expect("cannot insert a root");
        if !self.nodes.read().unwrap().contains_key(&key(&parent)) {
            self.insert(&parent, FileAttributes::DIRECTORY, 0, None);
        }
        let mut nodes = self.nodes.write().unwrap();
        let child_key = key(path);
        if nodes.contains_key(&child_key) {
            return;
        }
        nodes
            .get_mut(&key(&parent))
            .expect("parent exists")
            .children
            .push(child_key.clone());
        nodes.insert(
            child_key,
            Node {
                name,
                attributes,
                size,
                created: epoch(),
                accessed: epoch(),
                modified: epoch(),
                children: Vec::new(),
                transaction,
            },
        );
    }

    /// Create a directory and any missing parents.
    pub fn add_dir(&self, path: &str) -> &Self {
        self.insert(path, FileAttributes::DIRECTORY, 0, None);
        self
    }

    /// Create a file and any missing parent directories.
    pub fn add_file(&self, path: &str, size: u64) -> &Self {
        self.insert(path, FileAttributes::ARCHIVE, size, None);
        self
    }

    /// Create a directory reparse point (junction).
    pub fn add_junction(&self, path: &str) -> &Self {
        self.insert(
            path,
            FileAttributes::DIRECTORY | FileAttributes::REPARSE_POINT,
            0,
            None,
        );
        self
    }

    /// Create a file visible only inside `transaction`.
    pub fn add_file_in(&self, path: &str, transaction: Transaction) -> &Self {
        self.insert(path, FileAttributes::ARCHIVE, 0, Some(transaction));
        self
    }

    /// Make `open_search` on `path` fail with `PermissionDenied`.
    pub fn deny(&self, path: &str) -> &Self {
        self.denied.write().unwrap().insert(key(path));
        self
    }

    /// Make the first `next_entry` in `path` fail with an I/O error.
    pub fn break_reads(&self, path: &str) -> &Self {
        self.break_read_at(path, 1)
    }

    /// Make the `read`-th `next_entry` in `path` fail; reads 1 and 2 return `.` and `..`.
    pub fn break_read_at(&self, path: &str, read: usize) -> &Self {
        self.broken.write().unwrap().insert(key(path), read);
        self
    }

    /// Start a transaction the provider will accept.
    pub fn begin_transaction(&self) -> Transaction {
        let txn = Transaction::from_raw(self.next_transaction.fetch_add(1, Ordering::SeqCst));
        self.transactions.write().unwrap().insert(txn);
        txn
    }

    /// Forget a transaction; later calls inside it fail.
    pub fn roll_back(&self, transaction: Transaction) {
        self.transactions.write().unwrap().remove(&transaction);
    }

    /// Successful `open_search` calls.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// `close_search` calls.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Highest number of searches ever open at once.
    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    /// Searches currently open.
    pub fn open_now(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    /// Transaction passed to each `open_search` call, in call order.
    pub fn open_transactions(&self) -> Vec<Option<Transaction>> {
        self.open_transactions.lock().unwrap().clone()
    }

    fn check_transaction(&self, transaction: Option<Transaction>) -> Result<(), FsError> {
        match transaction {
            Some(txn) if !self.transactions.read().unwrap().contains(&txn) => {
                Err(FsError::Transaction {
                    reason: format!("unknown transaction {}", txn.as_raw()),
                })
            }
            _ => Ok(()),
        }
    }
}

impl FsSearch for MemoryProvider {
    fn open_search(
        &self,
        dir: &NormalizedPath,
        transaction: Option<Transaction>,
    ) -> Result<SearchHandle, FsError> {
        self.open_transactions.lock().unwrap().push(transaction);
        self.check_transaction(transaction)?;

        let dir_key = key(dir.as_str());
        if self.denied.read().unwrap().contains(&dir_key) {
            return Err(FsError::PermissionDenied {
                path: dir.to_string(),
                operation: "open_search",
            });
        }

        let nodes = self.nodes.read().unwrap();
        let node = nodes
            .get(&dir_key)
            .filter(|node| node.visible_in(transaction))
            .ok_or_else(|| FsError::NotFound {
                path: dir.to_string(),
            })?;
        if !node.attributes.is_directory() {
            return Err(FsError::NotADirectory {
                path: dir.to_string(),
            });
        }

        let mut entries = VecDeque::new();
        for dot in [".", ".."] {
            let mut data = node.find_data();
            data.name = dot.to_owned();
            entries.push_back(data);
        }
        entries.extend(
            node.children
                .iter()
                .filter_map(|child| nodes.get(child))
                .filter(|child| child.visible_in(transaction))
                .map(Node::find_data),
        );

        let handle = self.next_handle.fetch_add(1, Ordering::SeqCst);
        let mut searches = self.searches.lock().unwrap();
        searches.insert(
            handle,
            Search {
                dir: dir.to_string(),
                entries,
                reads: 0,
                fail_read: self.broken.read().unwrap().get(&dir_key).copied(),
            },
        );
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.max_open.fetch_max(searches.len(), Ordering::SeqCst);
        Ok(SearchHandle(handle))
    }

    fn next_entry(&self, handle: SearchHandle) -> Result<Option<FindData>, FsError> {
        let mut searches = self.searches.lock().unwrap();
        let search = searches.get_mut(&handle.0).ok_or_else(|| FsError::Io {
            operation: "next_entry",
            path: String::new(),
            source: std::io::Error::other("invalid search handle"),
        })?;
        search.reads += 1;
        if search.fail_read == Some(search.reads) {
            return Err(FsError::Io {
                operation: "next_entry",
                path: search.dir.clone(),
                source: std::io::Error::other("device not ready"),
            });
        }
        Ok(search.entries.pop_front())
    }

    fn close_search(&self, handle: SearchHandle) -> Result<(), FsError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        match self.searches.lock().unwrap().remove(&handle.0) {
            Some(_) => Ok(()),
            None => Err(FsError::Io {
                operation: "close_search",
                path: String::new(),
                source: std::io::Error::other("search closed twice"),
            }),
        }
    }
}

impl FsTimes for MemoryProvider {
    fn set_times(
        &self,
        path: &NormalizedPath,
        times: &FileTimes,
        transaction: Option<Transaction>,
    ) -> Result<(), FsError> {
        self.check_transaction(transaction)?;
        let mut nodes = self.nodes.write().unwrap();
        let node = nodes
            .get_mut(&key(path.as_str()))
            .filter(|node| node.visible_in(transaction))
            .ok_or_else(|| FsError::NotFound {
                path: path.to_string(),
            })?;
        if let Some(created) = times.created {
            node.created = created;
        }
        if let Some(accessed) = times.accessed {
            node.accessed = accessed;
        }
        if let Some(modified) = times.modified {
            node.modified = modified;
        }
        Ok(())
    }

    fn file_time(
        &self,
        path: &NormalizedPath,
        kind: TimestampKind,
        transaction: Option<Transaction>,
    ) -> Result<SystemTime, FsError> {
        self.check_transaction(transaction)?;
        let nodes = self.nodes.read().unwrap();
        let node = nodes
            .get(&key(path.as_str()))
            .filter(|node| node.visible_in(transaction))
            .ok_or_else(|| FsError::NotFound {
                path: path.to_string(),
            })?;
        Ok(match kind {
            TimestampKind::Creation => node.created,
            TimestampKind::LastAccess => node.accessed,
            TimestampKind::LastWrite => node.modified,
        })
    }
}

impl FsRoot for MemoryProvider {}

/// The tree most enumeration tests run against.
///
/// ```text
/// C:\data
/// ├── a.txt
/// ├── b.log
/// ├── X\
/// │   ├── x1.txt
/// │   └── deep\
/// │       └── d.txt
/// ├── Y\
/// │   └── y1.TXT
/// └── Z\
/// ```
pub fn sample_tree() -> MemoryProvider {
    let fs = MemoryProvider::new();
    fs.add_file(r"C:\data\a.txt", 10)
        .add_file(r"C:\data\b.log", 20)
        .add_file(r"C:\data\X\x1.txt", 30)
        .add_file(r"C:\data\X\deep\d.txt", 40)
        .add_file(r"C:\data\Y\y1.TXT", 50)
        .add_dir(r"C:\data\Z");
    fs
}
