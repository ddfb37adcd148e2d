//! Queryable sequence.
//!
//! [`ListContainer`] is an ordered collection that can be filtered with a
//! [`Predicate`] and sorted by composite keys. Filtering and ordering return
//! new containers and leave the receiver untouched; [`ListContainer::retain`]
//! and [`ListContainer::sort_by_keys`] are the in-place variants.

use std::ops::Index;

use crate::error::Result;
use crate::key::{KeyExtractor, KeySpec};
use crate::ordering::{compare_keys, try_stable_sort, SortOptions};
use crate::predicate::Predicate;
use crate::slice::Slice;
use crate::traits::Queryable;

/// An ordered collection supporting predicate filtering and key sorting.
///
/// # Example
///
/// ```
/// use doid::{q, ListContainer, Value, Queryable};
///
/// #[derive(Clone)]
/// struct City { name: &'static str, population: u32 }
///
/// impl Queryable for City {
///     fn field(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "name" => Some(Value::from(self.name)),
///             "population" => Some(Value::from(self.population)),
///             _ => None,
///         }
///     }
/// }
///
/// let cities: ListContainer<City> = vec![
///     City { name: "Lake Rhonda", population: 3_100 },
///     City { name: "Andersonfurt", population: 12_000 },
///     City { name: "Pattonstad", population: 800 },
/// ]
/// .into();
///
/// let big = cities.filter(&q!(population__gt = 1_000).unwrap()).unwrap();
/// let names: Vec<_> = big.order_by(["name"]).unwrap().iter().map(|c| c.name).collect();
/// assert_eq!(names, ["Andersonfurt", "Lake Rhonda"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListContainer<T> {
    items: Vec<T>,
}

impl<T> ListContainer<T> {
    /// Creates an empty container.
    pub fn new() -> Self {
        ListContainer { items: Vec::new() }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the container has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`. Negative indices count from the end.
    pub fn get(&self, index: isize) -> Option<&T> {
        let index = if index < 0 {
            self.items.len().checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        self.items.get(index)
    }

    /// Appends an element.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> ListContainer<T> {
    /// Returns the elements selected by `slice`, as a new container.
    pub fn slice(&self, slice: impl Into<Slice>) -> Result<Self> {
        let positions = slice.into().positions(self.items.len())?;
        Ok(positions.into_iter().map(|i| self.items[i].clone()).collect())
    }

    /// Returns a copy with the elements in reverse order.
    pub fn reversed(&self) -> Self {
        self.items.iter().rev().cloned().collect()
    }
}

impl<T: Queryable> ListContainer<T> {
    /// Returns the elements matching `predicate`, in their original order.
    ///
    /// The first evaluation error aborts the call.
    pub fn filter(&self, predicate: &Predicate) -> Result<Self>
    where
        T: Clone,
    {
        let mut matched = Vec::new();
        for item in &self.items {
            if predicate.matches(item)? {
                matched.push(item.clone());
            }
        }
        tracing::debug!(
            %predicate,
            input = self.items.len(),
            output = matched.len(),
            "filtered container"
        );
        Ok(ListContainer { items: matched })
    }

    /// Keeps only the elements matching `predicate`.
    ///
    /// Every element is evaluated before any is removed, so on error the
    /// container is unchanged.
    pub fn retain(&mut self, predicate: &Predicate) -> Result<()> {
        let keep = self
            .items
            .iter()
            .map(|item| predicate.matches(item))
            .collect::<Result<Vec<bool>>>()?;
        let before = self.items.len();
        let mut keep = keep.into_iter();
        self.items.retain(|_| keep.next().unwrap_or(false));
        tracing::debug!(
            %predicate,
            input = before,
            output = self.items.len(),
            "retained matching elements"
        );
        Ok(())
    }

    /// Returns a copy sorted ascending by the composite key.
    ///
    /// Elements with equal keys keep their relative order.
    pub fn order_by<I, S>(&self, keys: I) -> Result<Self>
    where
        T: Clone,
        I: IntoIterator<Item = S>,
        S: Into<KeySpec<T>>,
    {
        self.order_by_with(keys, SortOptions::default())
    }

    /// Returns a copy sorted by the composite key with the given options.
    ///
    /// With `reverse`, every comparison is inverted; elements with equal keys
    /// still keep their relative order.
    pub fn order_by_with<I, S>(&self, keys: I, options: SortOptions) -> Result<Self>
    where
        T: Clone,
        I: IntoIterator<Item = S>,
        S: Into<KeySpec<T>>,
    {
        let extractor = KeyExtractor::new(keys)?;
        let order = self.sorted_order(&extractor, options)?;
        tracing::debug!(
            keys = extractor.len(),
            reverse = options.reverse,
            len = order.len(),
            "ordered container"
        );
        Ok(order.into_iter().map(|i| self.items[i].clone()).collect())
    }

    /// Sorts in place by the composite key.
    ///
    /// On error the container is unchanged.
    pub fn sort_by_keys<I, S>(&mut self, keys: I, options: SortOptions) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<KeySpec<T>>,
    {
        let extractor = KeyExtractor::new(keys)?;
        let order = self.sorted_order(&extractor, options)?;
        tracing::debug!(
            keys = extractor.len(),
            reverse = options.reverse,
            len = order.len(),
            "sorted container in place"
        );

        let mut slots: Vec<Option<T>> = std::mem::take(&mut self.items)
            .into_iter()
            .map(Some)
            .collect();
        self.items = order.into_iter().filter_map(|i| slots[i].take()).collect();
        Ok(())
    }

    /// Number of elements matching `predicate`.
    pub fn count(&self, predicate: &Predicate) -> Result<usize> {
        let mut count = 0;
        for item in &self.items {
            if predicate.matches(item)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Returns `true` if any element matches `predicate`.
    pub fn exists(&self, predicate: &Predicate) -> Result<bool> {
        Ok(self.position(predicate)?.is_some())
    }

    /// First element matching `predicate`.
    pub fn first(&self, predicate: &Predicate) -> Result<Option<&T>> {
        Ok(self.position(predicate)?.map(|i| &self.items[i]))
    }

    /// Index of the first element matching `predicate`.
    pub fn position(&self, predicate: &Predicate) -> Result<Option<usize>> {
        for (i, item) in self.items.iter().enumerate() {
            if predicate.matches(item)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    fn sorted_order(&self, extractor: &KeyExtractor<T>, options: SortOptions) -> Result<Vec<usize>> {
        // Keys are computed once per element
        let keys = self
            .items
            .iter()
            .map(|item| extractor.extract(item))
            .collect::<Result<Vec<_>>>()?;
        let mut order: Vec<usize> = (0..keys.len()).collect();
        try_stable_sort(&mut order, |a, b| {
            Ok(options.apply(compare_keys(&keys[a], &keys[b])?))
        })?;
        Ok(order)
    }
}

impl<T> Default for ListContainer<T> {
    fn default() -> Self {
        ListContainer::new()
    }
}

impl<T> From<Vec<T>> for ListContainer<T> {
    fn from(items: Vec<T>) -> Self {
        ListContainer { items }
    }
}

impl<T> From<ListContainer<T>> for Vec<T> {
    fn from(list: ListContainer<T>) -> Self {
        list.items
    }
}

impl<T> FromIterator<T> for ListContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ListContainer {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for ListContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for ListContainer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for ListContainer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for ListContainer<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.items == *other
    }
}

impl<T: PartialEq> PartialEq<[T]> for ListContainer<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for ListContainer<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.items == *other
    }
}

impl<T: PartialEq> PartialEq<ListContainer<T>> for Vec<T> {
    fn eq(&self, other: &ListContainer<T>) -> bool {
        *self == other.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::key::K;
    use crate::value::Value;

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        name: &'static str,
        priority: i64,
        owner: Option<&'static str>,
    }

    impl Queryable for Task {
        fn field(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "name" => Some(Value::from(self.name)),
                "priority" => Some(Value::from(self.priority)),
                "owner" => Some(Value::from(self.owner)),
                _ => None,
            }
        }
    }

    fn task(name: &'static str, priority: i64) -> Task {
        Task {
            name,
            priority,
            owner: None,
        }
    }

    fn tasks() -> ListContainer<Task> {
        vec![
            task("write docs", 3),
            task("fix bug", 5),
            task("triage", 3),
            task("release", 1),
        ]
        .into()
    }

    fn names(list: &ListContainer<Task>) -> Vec<&'static str> {
        list.iter().map(|t| t.name).collect()
    }

    #[test]
    fn filter_keeps_order() {
        let p = Predicate::parse("priority__ge", 3).unwrap();
        let result = tasks().filter(&p).unwrap();
        assert_eq!(names(&result), ["write docs", "fix bug", "triage"]);
    }

    #[test]
    fn filter_does_not_touch_receiver() {
        let list = tasks();
        let _ = list.filter(&Predicate::parse("priority", 1).unwrap()).unwrap();
        assert_eq!(list, tasks());
    }

    #[test]
    fn filter_propagates_lookup_errors() {
        let p = Predicate::parse("missing", 1).unwrap();
        assert!(matches!(tasks().filter(&p), Err(QueryError::Lookup { .. })));
    }

    #[test]
    fn filter_empty_container() {
        let empty: ListContainer<Task> = ListContainer::new();
        let p = Predicate::parse("missing", 1).unwrap();
        assert!(empty.filter(&p).unwrap().is_empty());
    }

    #[test]
    fn retain_in_place() {
        let mut list = tasks();
        list.retain(&Predicate::parse("priority", 3).unwrap()).unwrap();
        assert_eq!(names(&list), ["write docs", "triage"]);
    }

    #[test]
    fn retain_error_leaves_container_unchanged() {
        let mut list = tasks();
        let p = Predicate::parse("priority__gt", "x").unwrap();
        assert!(list.retain(&p).is_err());
        assert_eq!(list, tasks());
    }

    #[test]
    fn order_by_is_stable() {
        let sorted = tasks().order_by(["priority"]).unwrap();
        assert_eq!(names(&sorted), ["release", "write docs", "triage", "fix bug"]);
    }

    #[test]
    fn reverse_keeps_ties_in_input_order() {
        let sorted = tasks()
            .order_by_with(["priority"], SortOptions::descending())
            .unwrap();
        assert_eq!(names(&sorted), ["fix bug", "write docs", "triage", "release"]);
    }

    #[test]
    fn order_by_multiple_keys() {
        let sorted = tasks().order_by(["priority", "name"]).unwrap();
        assert_eq!(names(&sorted), ["release", "triage", "write docs", "fix bug"]);
    }

    #[test]
    fn order_by_closure_key() {
        let keys = K::new().func(|t: &Task| Value::from(t.name.len()));
        let sorted = tasks().order_by(keys).unwrap();
        assert_eq!(names(&sorted), ["triage", "fix bug", "release", "write docs"]);
    }

    #[test]
    fn order_by_null_and_value_mismatch() {
        let mut list = tasks();
        list.push(Task {
            name: "assigned",
            priority: 2,
            owner: Some("ana"),
        });
        let result = list.order_by(["owner"]);
        assert!(matches!(result, Err(QueryError::TypeMismatch { .. })));
    }

    #[test]
    fn order_by_bad_path() {
        assert!(matches!(
            tasks().order_by(["priority__"]),
            Err(QueryError::InvalidClause { .. })
        ));
        assert!(matches!(
            tasks().order_by(["nope"]),
            Err(QueryError::Lookup { .. })
        ));
    }

    #[test]
    fn sort_in_place() {
        let mut list = tasks();
        list.sort_by_keys(["name"], SortOptions::new()).unwrap();
        assert_eq!(names(&list), ["fix bug", "release", "triage", "write docs"]);

        list.sort_by_keys(["priority"], SortOptions::descending())
            .unwrap();
        assert_eq!(names(&list), ["fix bug", "triage", "write docs", "release"]);
    }

    #[test]
    fn convenience_queries() {
        let list = tasks();
        let p = Predicate::parse("priority", 3).unwrap();
        assert_eq!(list.count(&p).unwrap(), 2);
        assert!(list.exists(&p).unwrap());
        assert_eq!(list.position(&p).unwrap(), Some(0));
        assert_eq!(list.first(&p).unwrap().map(|t| t.name), Some("write docs"));

        let none = Predicate::parse("priority", 9).unwrap();
        assert!(!list.exists(&none).unwrap());
        assert_eq!(list.first(&none).unwrap(), None);
    }

    #[test]
    fn sequence_contract() {
        let list = tasks();
        assert_eq!(list.len(), 4);
        assert_eq!(list[1].name, "fix bug");
        assert_eq!(list.get(0).map(|t| t.name), Some("write docs"));
        assert_eq!(list.get(-1).map(|t| t.name), Some("release"));
        assert_eq!(list.get(-4).map(|t| t.name), Some("write docs"));
        assert_eq!(list.get(-5), None);
        assert_eq!(list.get(4), None);

        assert_eq!(names(&list.reversed()), ["release", "triage", "fix bug", "write docs"]);
        assert_eq!(list.slice(..).unwrap(), list);
        assert_eq!(names(&list.slice(1..3).unwrap()), ["fix bug", "triage"]);
        assert_eq!(list.slice(Slice::new().step(-1)).unwrap(), list.reversed());
        assert!(matches!(
            list.slice(Slice::new().step(0)),
            Err(QueryError::InvalidSlice)
        ));
    }

    #[test]
    fn conversions() {
        let mut list: ListContainer<i32> = (1..=3).collect();
        list.extend([4, 5]);
        assert_eq!(list, vec![1, 2, 3, 4, 5]);
        assert_eq!(list, [1, 2, 3, 4, 5][..]);
        assert_eq!(vec![1, 2, 3, 4, 5], list);
        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5]);

        let total: i32 = (&list).into_iter().sum();
        assert_eq!(total, 15);
        let v: Vec<i32> = list.clone().into();
        assert_eq!(v, list.into_vec());
    }
}
