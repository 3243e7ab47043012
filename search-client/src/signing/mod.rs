//! Request signing for managed search services.
//!
//! Requests to AWS OpenSearch Service are authenticated with AWS Signature
//! Version 4. The signer here is a pure function of the request, the
//! credentials and the signing instant; fetching credentials and deciding
//! when to sign live in [`crate::connection`].

mod sigv4;

pub use sigv4::{SigV4Signer, AUTHORIZATION, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
