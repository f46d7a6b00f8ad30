//! Diesel schema for the durable retry queue.

diesel::table! {
    /// Queued deferred mutations, drained in enqueue order.
    retry_messages (id) {
        /// Queue position, assigned by the database.
        id -> Int8,
        /// Enqueue timestamp.
        enqueued_at -> Timestamptz,
        /// The serialised operation, `{"operation": ..., "data": ...}`.
        payload -> Jsonb,
    }
}
