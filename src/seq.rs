/// A growable, ordered container with amortized O(1) appends.
///
/// Capacity starts at `Seq::INITIAL_CAPACITY` and doubles whenever a push
/// would exceed it.
#[derive(Debug, Clone)]
pub struct Seq<T> {
    capacity: usize,
    data: Vec<T>,
}

// Generic constants
impl<T> Seq<T> {
    /// Represents the capacity of a freshly initialized sequence.
    pub const INITIAL_CAPACITY: usize = 16;

    /// Represents the factor applied to capacity on each growth.
    const GROWTH_FACTOR: usize = 2;
}

impl<T> Seq<T> {
    /// Sequence initializer type.
    pub fn new() -> Self {
        Self::with_capacity(Self::INITIAL_CAPACITY)
    }

    /// Initializes an empty sequence with room for at least `capacity`
    /// elements. A zero capacity is bumped to one so that doubling always
    /// makes progress.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements the sequence can hold before its next
    /// growth.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn full(&self) -> bool {
        self.len() == self.capacity
    }

    pub fn push_mut(&mut self, elem: T) {
        if self.full() {
            self.grow_mut();
        }

        self.data.push(elem)
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.data.get(idx)
    }

    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn grow_mut(&mut self) {
        let next_capacity = self.capacity * Self::GROWTH_FACTOR;

        self.data.reserve_exact(next_capacity - self.data.len());
        self.capacity = next_capacity;
    }
}

impl<T> Default for Seq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::ops::Index<usize> for Seq<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.data[idx]
    }
}

impl<T> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut seq, elem| {
            seq.push_mut(elem);
            seq
        })
    }
}

impl<T> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T, const M: usize> PartialEq<[T; M]> for Seq<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T; M]) -> bool {
        self.data.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// A single failed check from the built-in self-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfTestFailure {
    pub line: u32,
    pub expected: usize,
    pub actual: usize,
}

impl std::fmt::Display for SelfTestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} expected, but got {}",
            self.line, self.expected, self.actual
        )
    }
}

fn expect(line: u32, expected: usize, actual: usize) -> Result<(), SelfTestFailure> {
    if expected == actual {
        Ok(())
    } else {
        Err(SelfTestFailure {
            line,
            expected,
            actual,
        })
    }
}

/// Exercises the sequence contract across several growth boundaries,
/// returning the first failed check.
pub fn self_test() -> Result<(), SelfTestFailure> {
    let mut seq = Seq::new();
    expect(line!(), 0, seq.len())?;

    for i in 0..100 {
        seq.push_mut(i);
    }

    expect(line!(), 100, seq.len())?;
    expect(line!(), 0, seq.get(0).copied().unwrap_or(usize::MAX))?;
    expect(line!(), 50, seq.get(50).copied().unwrap_or(usize::MAX))?;
    expect(line!(), 99, seq.get(99).copied().unwrap_or(usize::MAX))?;
    expect(line!(), 128, seq.capacity())
}
