//! AWS resource properties
//!
//! Property names serialize in the engine's camelCase form. Accessors on
//! `Declared<T>` expose each resource's outputs as [`OutputRef`] handles.

use crate::output::{Input, OutputRef};
use crate::resource::{Declared, Resource};
use serde::Serialize;
use std::collections::BTreeMap;

/// Resource tags (sorted for deterministic output)
pub type Tags = BTreeMap<String, String>;

/// Canned S3 ACL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    PublicRead,
}

// ============ S3 ============

/// S3 bucket configured for static website hosting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Physical bucket name
    pub bucket: String,
    pub acl: CannedAcl,
    pub website: Website,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub index_document: String,
    pub error_document: String,
}

impl Resource for Bucket {
    const TYPE: &'static str = "aws:s3/bucket:Bucket";
    const KIND: &'static str = "bucket";
}

impl Declared<Bucket> {
    pub fn id(&self) -> OutputRef {
        self.output("id")
    }

    pub fn regional_domain_name(&self) -> OutputRef {
        self.output("bucketRegionalDomainName")
    }
}

/// A file uploaded from disk; its bytes are not inspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAsset {
    #[serde(rename = "fileAsset")]
    pub path: String,
}

/// Single object uploaded into a bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketObject {
    pub bucket: Input<String>,
    pub acl: CannedAcl,
    pub content_type: String,
    pub source: FileAsset,
}

impl Resource for BucketObject {
    const TYPE: &'static str = "aws:s3/bucketObject:BucketObject";
    const KIND: &'static str = "bucket-object";
}

// ============ CloudFront ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    RedirectToHttps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceClass {
    #[serde(rename = "PriceClass_100")]
    Class100,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslSupportMethod {
    SniOnly,
}

/// CloudFront distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub origins: Vec<Origin>,
    pub enabled: bool,
    pub is_ipv6_enabled: bool,
    pub comment: String,
    pub default_root_object: String,
    pub aliases: Vec<String>,
    pub default_cache_behavior: CacheBehavior,
    pub price_class: PriceClass,
    pub tags: Tags,
    pub restrictions: Restrictions,
    pub viewer_certificate: ViewerCertificate,
    pub custom_error_responses: Vec<CustomErrorResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    pub domain_name: Input<String>,
    pub origin_id: Input<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheBehavior {
    pub allowed_methods: Vec<HttpMethod>,
    pub cached_methods: Vec<HttpMethod>,
    pub target_origin_id: Input<String>,
    pub forwarded_values: ForwardedValues,
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    pub min_ttl: u32,
    pub default_ttl: u32,
    pub max_ttl: u32,
    pub compress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedValues {
    pub query_string: bool,
    pub cookies: Cookies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cookies {
    pub forward: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    pub geo_restriction: GeoRestriction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRestriction {
    pub restriction_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerCertificate {
    pub acm_certificate_arn: String,
    pub ssl_support_method: SslSupportMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomErrorResponse {
    pub error_code: u16,
    pub error_caching_min_ttl: u32,
    pub response_code: u16,
    pub response_page_path: String,
}

impl Resource for Distribution {
    const TYPE: &'static str = "aws:cloudfront/distribution:Distribution";
    const KIND: &'static str = "distribution";
}

impl Declared<Distribution> {
    pub fn id(&self) -> OutputRef {
        self.output("id")
    }

    pub fn domain_name(&self) -> OutputRef {
        self.output("domainName")
    }

    pub fn hosted_zone_id(&self) -> OutputRef {
        self.output("hostedZoneId")
    }
}

// ============ Route 53 ============

/// Route 53 hosted zone
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    pub comment: String,
    pub name: String,
    pub tags: Tags,
}

impl Resource for HostedZone {
    const TYPE: &'static str = "aws:route53/zone:Zone";
    const KIND: &'static str = "zone";
}

impl Declared<HostedZone> {
    pub fn id(&self) -> OutputRef {
        self.output("id")
    }

    pub fn zone_id(&self) -> OutputRef {
        self.output("zoneId")
    }

    pub fn name_servers(&self) -> OutputRef {
        self.output("nameServers")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Ns,
}

/// Route 53 record: either an alias record or a plain record with values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub zone_id: Input<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Alias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Input<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub name: Input<String>,
    pub zone_id: Input<String>,
    pub evaluate_target_health: bool,
}

impl Resource for Record {
    const TYPE: &'static str = "aws:route53/record:Record";
    const KIND: &'static str = "record";
}

impl Declared<Record> {
    pub fn record_name(&self) -> OutputRef {
        self.output("name")
    }
}

// ============ RDS ============

/// RDS database instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInstance {
    pub engine: String,
    pub engine_version: String,
    pub instance_class: String,
    /// GiB
    pub allocated_storage: u32,
    pub parameter_group_name: String,
    pub skip_final_snapshot: bool,
    pub username: String,
    pub password: Input<String>,
    pub db_name: String,
    pub tags: Tags,
}

impl Resource for DatabaseInstance {
    const TYPE: &'static str = "aws:rds/instance:Instance";
    const KIND: &'static str = "database";
}

impl Declared<DatabaseInstance> {
    pub fn id(&self) -> OutputRef {
        self.output("id")
    }
}
