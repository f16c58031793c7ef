pub mod mock_llm_server;
pub mod mock_odoo_server;
