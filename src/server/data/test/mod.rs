mod holder;
mod tenant_config;
