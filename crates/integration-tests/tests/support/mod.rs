pub mod api_app;
pub mod mock_upstream;
