mod allowlist;


pub use allowlist::AllowedUpstreamSet;
