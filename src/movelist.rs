use crate::r#move::Move;
use arrayvec::ArrayVec;

/// No position has more than 218 legal moves; pseudo-legal lists stay well
/// under this bound too.
pub const MAX_MOVELIST_CAPACITY: usize = 256;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList(ArrayVec<Move, MAX_MOVELIST_CAPACITY>);

impl MoveList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn push(&mut self, m: Move) {
        self.0.push(m)
    }
    pub fn get(&self, i: usize) -> Option<&Move> {
        self.0.get(i)
    }
    pub fn contains(&self, m: &Move) -> bool {
        self.0.contains(m)
    }
    pub fn retain<F: FnMut(&mut Move) -> bool>(&mut self, f: F) {
        self.0.retain(f)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[Move] {
        self.0.as_slice()
    }
}

impl From<Vec<Move>> for MoveList {
    fn from(v: Vec<Move>) -> Self {
        v.into_iter().collect()
    }
}
impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut mv_list = MoveList::default();
        for m in iter {
            mv_list.push(m)
        }
        mv_list
    }
}
impl std::fmt::Display for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let mut s = String::new();
        for m in self.0.iter() {
            s.push_str(&format!("{} ", m))
        }
        write!(f, "{}", s.trim())
    }
}
impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_MOVELIST_CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
