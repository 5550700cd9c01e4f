//! AWS Signature v4 for the one raw S3 call rust-s3 does not cover (PUT bucket policy)

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

pub struct SigningKeys<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
}

/// Headers to attach to a signed `PUT /{bucket}?policy`
#[derive(Debug)]
pub struct SignedPolicyRequest {
    pub url: String,
    pub host: String,
    pub amz_date: String,
    pub payload_hash: String,
    pub authorization: String,
}

pub fn sign_put_bucket_policy(
    endpoint: &str,
    bucket: &str,
    policy: &str,
    keys: &SigningKeys<'_>,
    now: DateTime<Utc>,
) -> Result<SignedPolicyRequest, AppError> {
    let date_stamp = now.format("%Y%m%d").to_string();
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

    let endpoint_url = Url::parse(endpoint)
        .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
    let host = endpoint_url
        .host_str()
        .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
    let host = match endpoint_url.port() {
        Some(p) => format!("{}:{}", host, p),
        None => host.to_string(),
    };

    let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

    let canonical_headers = format!(
        "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
        host, payload_hash, amz_date
    );
    let canonical_request = format!(
        "PUT\n/{}\npolicy=\n{}\n{}\n{}",
        bucket, canonical_headers, SIGNED_HEADERS, payload_hash
    );

    let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, keys.region);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        credential_scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let signature = signature(keys, &date_stamp, &string_to_sign)?;

    Ok(SignedPolicyRequest {
        url: format!("{}/{}?policy", endpoint.trim_end_matches('/'), bucket),
        host,
        amz_date,
        payload_hash,
        authorization: format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, keys.access_key, credential_scope, SIGNED_HEADERS, signature
        ),
    })
}

fn signature(
    keys: &SigningKeys<'_>,
    date_stamp: &str,
    string_to_sign: &str,
) -> Result<String, AppError> {
    let k_date = hmac_sha256(
        format!("AWS4{}", keys.secret_key).as_bytes(),
        date_stamp.as_bytes(),
    )?;
    let k_region = hmac_sha256(&k_date, keys.region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, b"s3")?;
    let k_signing = hmac_sha256(&k_service, b"aws4_request")?;

    Ok(hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes())?))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn keys() -> SigningKeys<'static> {
        SigningKeys {
            access_key: "minioadmin",
            secret_key: "minioadmin",
            region: "us-east-1",
        }
    }

    #[test]
    fn test_signed_request_shape() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let signed = sign_put_bucket_policy(
            "http://localhost:9000/",
            "civic-reports",
            "{}",
            &keys(),
            now,
        )
        .unwrap();

        assert_eq!(signed.url, "http://localhost:9000/civic-reports?policy");
        assert_eq!(signed.host, "localhost:9000");
        assert_eq!(signed.amz_date, "20250314T092653Z");
        assert_eq!(signed.payload_hash, hex::encode(Sha256::digest(b"{}")));

        let prefix = "AWS4-HMAC-SHA256 Credential=minioadmin/20250314/us-east-1/s3/aws4_request, \
                      SignedHeaders=host;x-amz-content-sha256;x-amz-date, Signature=";
        assert!(signed.authorization.starts_with(prefix));
        let sig = &signed.authorization[prefix.len()..];
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_depends_on_policy() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let a = sign_put_bucket_policy("http://minio", "b", "{\"a\":1}", &keys(), now).unwrap();
        let b = sign_put_bucket_policy("http://minio", "b", "{\"a\":2}", &keys(), now).unwrap();
        assert_ne!(a.authorization, b.authorization);
        assert_eq!(a.host, "minio");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let err = sign_put_bucket_policy("not a url", "b", "{}", &keys(), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
