pub mod vault_token_reader;
