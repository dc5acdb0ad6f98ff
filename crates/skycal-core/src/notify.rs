//! Change notifications from the session to the UI glue.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Change {
    /// New upload: everything derived was reset.
    Session,
    Selection,
    Orientation,
    Points,
    Step,
    Render,
    Segmentation,
    Forecast,
    /// A hemisphere choice is waiting for the user.
    Prompt,
}

impl Change {
    pub const ALL: [Change; 9] = [
        Change::Session,
        Change::Selection,
        Change::Orientation,
        Change::Points,
        Change::Step,
        Change::Render,
        Change::Segmentation,
        Change::Forecast,
        Change::Prompt,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of change kinds accumulated between two drains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Changes(u16);

impl Changes {
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub fn insert(&mut self, c: Change) {
        self.0 |= c.bit();
    }

    #[inline]
    pub fn contains(&self, c: Change) -> bool {
        self.0 & c.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Change> + '_ {
        Change::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Change> for Changes {
    fn from_iter<I: IntoIterator<Item = Change>>(iter: I) -> Self {
        let mut out = Changes::empty();
        for c in iter {
            out.insert(c);
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(Change)>;

/// Callback registry. Listeners run in subscription order, once per change
/// kind in the dispatched set.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Change) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn dispatch(&mut self, changes: Changes) {
        for change in changes.iter() {
            for (_, listener) in self.listeners.iter_mut() {
                listener(change);
            }
        }
    }
}
