use reminder_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

/// Inserts `val` unless an item matching `conflicts` is already stored.
/// Returns whether `val` was inserted.
pub fn insert_unless<T: Clone, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    conflicts: F,
) -> bool {
    let mut collection = collection.lock().unwrap();
    if collection.iter().any(conflicts) {
        return false;
    }
    collection.push(val.clone());
    true
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

/// Applies `update` to the item with the given id if it matches `compare`.
/// Returns whether the item was updated.
pub fn update_if<T: Entity, F: Fn(&T) -> bool, U: FnOnce(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> bool {
    let mut collection = collection.lock().unwrap();
    match collection
        .iter_mut()
        .find(|item| item.id() == val_id && compare(item))
    {
        Some(item) => {
            update(item);
            true
        }
        None => false,
    }
}

pub fn delete<T: Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}
