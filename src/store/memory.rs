//! In-process board store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::{BoardRecord, NewBoard};

/// Board records held in a map, ids assigned from a counter starting at 1
pub struct MemoryStore {
    boards: RwLock<HashMap<i64, BoardRecord>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            boards: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn insert(&self, board: NewBoard) -> BoardRecord {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let record = BoardRecord {
            id,
            width: board.width,
            height: board.height,
            generation: board.generation,
            is_final: board.is_final,
            data: board.data,
            created_at: now,
            updated_at: now,
        };

        self.boards.write().await.insert(id, record.clone());
        record
    }

    pub async fn get(&self, id: i64) -> Option<BoardRecord> {
        self.boards.read().await.get(&id).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.boards.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_board(generation: i32) -> NewBoard {
        NewBoard {
            width: 2,
            height: 2,
            generation,
            is_final: false,
            data: vec![0b0101],
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert(new_board(0)).await;
        let second = store.insert(new_board(1)).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get() {
        let store = MemoryStore::new();
        let record = store.insert(new_board(3)).await;

        assert_eq!(store.get(record.id).await, Some(record));
        assert_eq!(store.get(99).await, None);
    }
}
