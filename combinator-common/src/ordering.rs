use std::cmp::Ordering;
use std::marker::PhantomData;

/// Three-way comparison with the boolean predicates derived from it.
///
/// Every `Ord` type is `Comparable` through the blanket impl below, so
/// primitives and strings need no wrapper types.
pub trait Comparable {
    /// Compares `self` with `other`.
    fn compare_to(&self, other: &Self) -> Ordering;

    /// Returns true if `self` and `other` compare equal.
    fn equals(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }

    /// Returns true if `self` sorts before `other`.
    fn less_than(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Less
    }

    /// Returns true if `self` sorts after `other`.
    fn greater_than(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Greater
    }
}

impl<T: Ord + ?Sized> Comparable for T {
    fn compare_to(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// A comparator injected into a stream backend at construction time.
///
/// This is the dependency-injection counterpart of [`Comparable`]: the
/// compared type does not need to know how it is ordered.
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns true if `a` and `b` compare equal.
    fn equals(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Returns true if `a` sorts before `b`.
    fn less_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns true if `a` sorts after `b`.
    fn greater_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Comparator delegating to the type's own `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Lifts an element comparator to a comparator over slices of elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceComparator<C, T> {
    element: C,
    _marker: PhantomData<fn(&T)>,
}

impl<C, T> SliceComparator<C, T>
where
    C: Comparator<T>,
{
    /// Creates a slice comparator from an element comparator.
    pub fn new(element: C) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }

    /// Returns the element comparator.
    pub fn element(&self) -> &C {
        &self.element
    }
}

impl<C, T> Comparator<[T]> for SliceComparator<C, T>
where
    C: Comparator<T>,
{
    fn compare(&self, a: &[T], b: &[T]) -> Ordering {
        compare_slices(a, b, &self.element)
    }
}

/// Compares two slices element by element.
///
/// The first non-equal pair decides. When one slice is a prefix of the
/// other, the shorter one is less.
pub fn compare_slices<T, C>(a: &[T], b: &[T], cmp: &C) -> Ordering
where
    C: Comparator<T> + ?Sized,
{
    for (x, y) in a.iter().zip(b.iter()) {
        match cmp.compare(x, y) {
            Ordering::Equal => continue,
            order => return order,
        }
    }
    compare_numbers(&a.len(), &b.len())
}

/// Compares two numbers; incomparable values (NaN) count as equal.
pub fn compare_numbers<N: PartialOrd>(a: &N, b: &N) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Compares two strings lexicographically by bytes.
pub fn compare_strings(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}
