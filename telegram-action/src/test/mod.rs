//! Unit test module
//!
//! Action layer unit tests live here, separate from source files.
//! Tests talk to the layer through its public API and a recording mock transport.

mod mock_bot;
