//! Handler tests driving `TaskHttpHandler` with in-memory request bodies.
