/// Synchronous string key/value storage.
///
/// Browser local storage is synchronous, so unlike most of the client this
/// interface does not return futures. Failures degrade to "absent" on reads
/// and are dropped on writes.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
