//! Integration tests for the harvest pipeline

mod http_session_tests;
mod mock_session;
