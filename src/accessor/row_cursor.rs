/// Typed read of the current row's value at a column.
///
/// A cursor implements this once per value representation it can serve. The
/// caller is trusted to only ask for the representation the column's
/// [`DataKind`](crate::schema::DataKind) advertises.
pub trait ReadValue<T> {
    fn read(&self, column: usize) -> T;
}

/// Live, position-advancing handle into a data source.
///
/// Advancing is the cursor's own business and happens through `&self`, so
/// accessors can keep borrowing the cursor while it moves. Every value
/// representation the accessor registry knows about is a supertrait here.
pub trait RowCursor:
    ReadValue<bool>
    + ReadValue<i8>
    + ReadValue<i16>
    + ReadValue<i32>
    + ReadValue<i64>
    + ReadValue<u8>
    + ReadValue<u16>
    + ReadValue<u32>
    + ReadValue<u64>
    + ReadValue<f32>
    + ReadValue<f64>
    + ReadValue<String>
    + ReadValue<Vec<bool>>
    + ReadValue<Vec<i8>>
    + ReadValue<Vec<i16>>
    + ReadValue<Vec<i32>>
    + ReadValue<Vec<i64>>
    + ReadValue<Vec<u8>>
    + ReadValue<Vec<u16>>
    + ReadValue<Vec<u32>>
    + ReadValue<Vec<u64>>
    + ReadValue<Vec<f32>>
    + ReadValue<Vec<f64>>
    + ReadValue<Vec<String>>
{
    /// Index of the current row.
    fn position(&self) -> u64;
}
