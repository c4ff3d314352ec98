use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::models::BaseEntity;
use crate::core::types::EntityKind;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Unordered,
    IdAsc,
    IdDesc,
}

/// Serializable form of a repository: rows in id order plus the id counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSnapshot<T> {
    pub rows: Vec<T>,
    pub next_id: i32,
}

impl<T> Default for RepoSnapshot<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Repository<T: BaseEntity> {
    kind: EntityKind,
    items: HashMap<i32, T>,
    next_id: i32,
}

impl<T: BaseEntity> Repository<T> {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            items: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Assigns the next id and stores the entity.
    pub fn insert(&mut self, mut entity: T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.items.entry(id).or_insert(entity)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Result<&T> {
        self.items
            .get(&id)
            .ok_or_else(|| Error::not_found(self.kind, id))
    }

    pub fn get_mut(&mut self, id: i32) -> Result<&mut T> {
        let kind = self.kind;
        self.items
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(kind, id))
    }

    /// Removes the entity if present; absent ids are not an error.
    pub fn remove(&mut self, id: i32) -> Option<T> {
        self.items.remove(&id)
    }

    /// Removes every entity matching `pred`, returning how many went.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|_, e| !pred(e));
        before - self.items.len()
    }

    pub fn values(&self, sort: Sort) -> Vec<&T> {
        let mut v: Vec<&T> = self.items.values().collect();
        match sort {
            Sort::Unordered => {}
            Sort::IdAsc => v.sort_by_key(|e| e.id()),
            Sort::IdDesc => v.sort_by_key(|e| std::cmp::Reverse(e.id())),
        }
        v
    }

    pub fn query(&self) -> Query<'_, T> {
        Query::new(self)
    }

    pub fn snapshot(&self) -> RepoSnapshot<T>
    where
        T: Clone,
    {
        RepoSnapshot {
            rows: self.values(Sort::IdAsc).into_iter().cloned().collect(),
            next_id: self.next_id,
        }
    }

    pub fn restore(kind: EntityKind, snapshot: RepoSnapshot<T>) -> Result<Self> {
        let mut repo = Self::new(kind);
        for row in snapshot.rows {
            let id = row.id();
            if id <= 0 || repo.items.contains_key(&id) {
                return Err(Error::persistence(format!(
                    "Stored {kind} id {id} is invalid or duplicated."
                )));
            }
            repo.next_id = repo.next_id.max(id + 1);
            repo.items.insert(id, row);
        }
        repo.next_id = repo.next_id.max(snapshot.next_id);
        Ok(repo)
    }
}

/// Filter/sort builder over a repository.
pub struct Query<'a, T: BaseEntity> {
    repo: &'a Repository<T>,
    filters: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
    sort: Sort,
    cmp: Option<Box<dyn Fn(&T, &T) -> Ordering + 'a>>,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    fn new(repo: &'a Repository<T>) -> Self {
        Self {
            repo,
            filters: Vec::new(),
            sort: Sort::Unordered,
            cmp: None,
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.filters.push(Box::new(pred));
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn order_with(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.cmp = Some(Box::new(cmp));
        self
    }

    pub fn collect(self) -> Vec<&'a T> {
        let mut v: Vec<&'a T> = self
            .repo
            .items
            .values()
            .filter(|e| self.filters.iter().all(|f| f(e)))
            .collect();
        if let Some(cmp) = &self.cmp {
            v.sort_by(|a, b| cmp(a, b));
        } else {
            match self.sort {
                Sort::Unordered => {}
                Sort::IdAsc => v.sort_by_key(|e| e.id()),
                Sort::IdDesc => v.sort_by_key(|e| std::cmp::Reverse(e.id())),
            }
        }
        v
    }

    pub fn ids(self) -> Vec<i32> {
        self.collect().into_iter().map(|e| e.id()).collect()
    }

    pub fn exists(self) -> bool {
        self.repo
            .items
            .values()
            .any(|e| self.filters.iter().all(|f| f(e)))
    }
}
