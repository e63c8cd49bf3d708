// Content generation: platform table → prompt composer → LLM provider → hashtag splitter.
// All provider calls go through llm_client — nothing here speaks HTTP to a provider.

pub mod composer;
pub mod generator;
pub mod handlers;
pub mod platforms;
pub mod prompts;
pub mod splitter;
