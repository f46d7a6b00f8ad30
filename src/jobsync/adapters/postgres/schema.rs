//! Diesel schema for job snapshot persistence.

diesel::table! {
    /// Mirrored agency job rows.
    job_snapshots (job_id) {
        /// Agency job identifier.
        job_id -> Int8,
        /// Agency client identifier.
        client_id -> Int8,
        /// Short client code.
        #[max_length = 100]
        client_code -> Varchar,
        /// Client display name.
        #[max_length = 200]
        client_name -> Varchar,
        /// Short job code.
        #[max_length = 100]
        job_code -> Varchar,
        /// Job display name.
        #[max_length = 200]
        job_name -> Varchar,
    }
}
