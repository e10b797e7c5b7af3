/// Path of the listing root.
pub const ROOT_PATH: &str = "/";

/// A visited directory. The path doubles as the identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub path: String,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            id: path.to_string(),
            path: path.to_string(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_PATH)
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }
}

/// Coarse navigation state derived from the history depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    AtRoot,
    InSubdirectory(usize),
}

/// Stack of visited directories, oldest first.
///
/// Never empty: the root location is pushed on creation and can never be
/// popped, so `current()` always has an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    stack: Vec<Location>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    /// Create a history holding only the root.
    pub fn new() -> Self {
        Self {
            stack: vec![Location::root()],
        }
    }

    /// Enter `target_path`. Empty paths are ignored; re-entering the current
    /// path pushes a duplicate.
    pub fn descend(&mut self, target_path: &str) {
        if target_path.is_empty() {
            return;
        }
        self.stack.push(Location::new(target_path));
    }

    /// Step back to the parent. Returns `false` (and changes nothing) at root.
    pub fn ascend(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &Location {
        // len >= 1 is an invariant of the type
        &self.stack[self.stack.len() - 1]
    }

    pub fn parent(&self) -> Option<&Location> {
        self.stack.len().checked_sub(2).map(|i| &self.stack[i])
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn depth(&self) -> usize {
        self.len() - 1
    }

    pub fn state(&self) -> NavState {
        match self.depth() {
            0 => NavState::AtRoot,
            d => NavState::InSubdirectory(d),
        }
    }
}
