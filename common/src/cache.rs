//! Cache ghi nhớ (memoization) cho các view dẫn xuất.
//!
//! Hai kiểu cache:
//! - [`MemoCell`]: một slot, giữ input và output của lần tính gần nhất.
//! - [`MemoMap`]: nhiều entry theo danh tính tham chiếu của input, giới hạn bằng LRU.
//!
//! Không có API xóa cache: entry cũ chỉ bị thay thế khi input thay đổi.

// Standard library imports
use std::{
    fmt,
    hash::{Hash, Hasher},
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

// Third party imports
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

// Internal imports
use crate::error::{CommonError, CommonResult};

/// Dung lượng mặc định của MemoMap
pub const DEFAULT_MEMO_MAP_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => panic!("capacity must be non-zero"),
};

/// Cách so sánh input để quyết định có tính lại hay không
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoDiscipline {
    /// Chỉ tính lại khi một tham chiếu input thay đổi
    Reference,
    /// Chỉ tính lại khi nội dung input khác nhau
    DeepEqual,
}

impl MemoDiscipline {
    /// Input mới có được coi là giống input cũ không
    pub fn matches<K: MemoInput>(&self, previous: &K, next: &K) -> bool {
        match self {
            MemoDiscipline::Reference => previous.same_ref(next),
            MemoDiscipline::DeepEqual => previous.same_value(next),
        }
    }
}

/// Input có thể dùng làm khóa cache.
///
/// `Arc<T>` so sánh theo con trỏ ở `same_ref` và theo nội dung ở `same_value`.
/// Kiểu vô hướng (chuỗi, bool, số) luôn so sánh theo giá trị.
pub trait MemoInput: Clone {
    /// Cùng danh tính
    fn same_ref(&self, other: &Self) -> bool;

    /// Cùng nội dung
    fn same_value(&self, other: &Self) -> bool;

    /// Hash nhất quán với `same_ref`
    fn hash_ref<H: Hasher>(&self, state: &mut H);
}

impl<T: PartialEq> MemoInput for Arc<T> {
    fn same_ref(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn same_value(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || **self == **other
    }

    fn hash_ref<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(self) as usize).hash(state);
    }
}

macro_rules! impl_memo_input_by_value {
    ($($ty:ty),*) => {
        $(
            impl MemoInput for $ty {
                fn same_ref(&self, other: &Self) -> bool {
                    self == other
                }

                fn same_value(&self, other: &Self) -> bool {
                    self == other
                }

                fn hash_ref<H: Hasher>(&self, state: &mut H) {
                    self.hash(state);
                }
            }
        )*
    };
}

impl_memo_input_by_value!(String, bool, u64, usize);

impl<T: MemoInput> MemoInput for Option<T> {
    fn same_ref(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_ref(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn hash_ref<H: Hasher>(&self, state: &mut H) {
        match self {
            Some(value) => {
                1u8.hash(state);
                value.hash_ref(state);
            }
            None => 0u8.hash(state),
        }
    }
}

macro_rules! impl_memo_input_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: MemoInput),+> MemoInput for ($($name,)+) {
            fn same_ref(&self, other: &Self) -> bool {
                $(self.$idx.same_ref(&other.$idx))&&+
            }

            fn same_value(&self, other: &Self) -> bool {
                $(self.$idx.same_value(&other.$idx))&&+
            }

            fn hash_ref<H: Hasher>(&self, state: &mut H) {
                $(self.$idx.hash_ref(state);)+
            }
        }
    };
}

impl_memo_input_tuple!(A: 0, B: 1);
impl_memo_input_tuple!(A: 0, B: 1, C: 2);
impl_memo_input_tuple!(A: 0, B: 1, C: 2, D: 3);

// Lock bị poison vẫn dùng tiếp được: dữ liệu bên trong chỉ là cache.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cache một slot: giữ input và output của lần tính gần nhất
pub struct MemoCell<K, V> {
    name: &'static str,
    discipline: MemoDiscipline,
    last: Mutex<Option<(K, V)>>,
    recomputations: AtomicUsize,
}

impl<K: MemoInput, V: Clone> MemoCell<K, V> {
    /// Tạo cache mới
    pub fn new(name: &'static str, discipline: MemoDiscipline) -> Self {
        Self {
            name,
            discipline,
            last: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Lấy giá trị từ cache, hoặc tính lại nếu input đã thay đổi.
    ///
    /// Lock không được giữ trong lúc `compute` chạy, nên `compute` có thể
    /// gọi sang cache khác.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some((previous, value)) = lock(&self.last).as_ref() {
            if self.discipline.matches(previous, &key) {
                trace!(view = self.name, "memo hit");
                return value.clone();
            }
        }

        let value = compute(&key);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        debug!(view = self.name, discipline = ?self.discipline, "recomputed view");

        *lock(&self.last) = Some((key, value.clone()));
        value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn discipline(&self) -> MemoDiscipline {
        self.discipline
    }

    /// Số lần hàm tính kết quả đã chạy
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }
}

impl<K, V> fmt::Debug for MemoCell<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCell")
            .field("name", &self.name)
            .field("discipline", &self.discipline)
            .field("recomputations", &self.recomputations.load(Ordering::Relaxed))
            .finish()
    }
}

/// Khóa so sánh theo danh tính tham chiếu
struct RefKey<K>(K);

impl<K: MemoInput> PartialEq for RefKey<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_ref(&other.0)
    }
}

impl<K: MemoInput> Eq for RefKey<K> {}

impl<K: MemoInput> Hash for RefKey<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_ref(state);
    }
}

/// Cache nhiều entry, khóa theo danh tính tham chiếu của input.
///
/// Entry giữ tham chiếu mạnh tới input, nên địa chỉ của một `Arc` đang
/// nằm trong cache không thể bị tái sử dụng cho dữ liệu khác.
pub struct MemoMap<K, V> {
    name: &'static str,
    entries: Mutex<LruCache<RefKey<K>, V>>,
    recomputations: AtomicUsize,
}

impl<K: MemoInput, V: Clone> MemoMap<K, V> {
    /// Tạo cache mới với dung lượng chỉ định
    pub fn new(name: &'static str, capacity: usize) -> CommonResult<Self> {
        let non_zero_capacity = NonZeroUsize::new(capacity)
            .ok_or(CommonError::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(name, non_zero_capacity))
    }

    pub fn with_capacity(name: &'static str, capacity: NonZeroUsize) -> Self {
        Self {
            name,
            entries: Mutex::new(LruCache::new(capacity)),
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Lấy giá trị từ cache, hoặc tính và lưu lại
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        let key = RefKey(key);
        if let Some(value) = lock(&self.entries).get(&key) {
            trace!(view = self.name, "memo hit");
            return value.clone();
        }

        let value = compute(&key.0);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        debug!(view = self.name, "recomputed view");

        lock(&self.entries).put(key, value.clone());
        value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Số lần hàm tính kết quả đã chạy
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Số entry đang giữ
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        lock(&self.entries).cap().get()
    }
}

impl<K, V> fmt::Debug for MemoMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoMap")
            .field("name", &self.name)
            .field("recomputations", &self.recomputations.load(Ordering::Relaxed))
            .finish()
    }
}
