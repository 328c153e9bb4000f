//! Pagination of materialized result sequences.
//!
//! # Examples
//!
//! ```
//! use sagitta::paginate::paginate;
//!
//! let items = [1, 2, 3, 4, 5];
//! let pages = paginate(&items, 2);
//! assert_eq!(pages, vec![&items[0..2], &items[2..4], &items[4..5]]);
//! ```

/// Split `items` into consecutive pages of `page_size` elements.
///
/// The final page may be shorter. A `page_size` of zero yields no
/// pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<&[T]> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).collect()
}
