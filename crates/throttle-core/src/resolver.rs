//! スタックトポロジーリゾルバー
//!
//! [`StackConfig`] を静的サイト配信用のリソースに変換する:
//! バケット、インデックスオブジェクト、CDNディストリビューション、ホストゾーン、
//! Apex と `www` のエイリアスレコード。スタックによっては親ゾーンのNS委任レコードと
//! データベースインスタンスも含む。
//!
//! 解決は設定のみに依存する純粋関数で、AWSへの通信は行わない。
//! リソース間の値はすべて [`OutputRef`] としてプロビジョニングエンジンに委ねる。
//!
//! [`OutputRef`]: throttle_cloud::OutputRef

use crate::error::{Result, StackError};
use crate::model::{DomainConfig, Environment, Exports, ResourceSet, StackConfig};
use throttle_cloud::Declared;
use throttle_cloud::Declaration;
use throttle_cloud::aws::{
    Alias, Bucket, BucketObject, CacheBehavior, CannedAcl, Cookies, CustomErrorResponse,
    DatabaseInstance, Distribution, FileAsset, ForwardedValues, GeoRestriction, HostedZone,
    HttpMethod, Origin, PriceClass, Record, RecordType, Restrictions, SslSupportMethod, Tags,
    ViewerCertificate, ViewerProtocolPolicy, Website,
};
use tracing::{debug, info, instrument};

const BUCKET_PREFIX: &str = "throttle-head-web-";
const DISTRIBUTION_PREFIX: &str = "throttle-head-web-acl-";
const DATABASE_PREFIX: &str = "throttle-head-db-";
const DATABASE_NAME_PREFIX: &str = "ThrottleHead";

const INDEX_DOCUMENT: &str = "index.html";
const ERROR_DOCUMENT: &str = "404.html";
const ERROR_PAGE_PATH: &str = "/404.html";
const DEFAULT_INDEX_ASSET: &str = "assets/hello-world.html";

const MIN_TTL: u32 = 0;
const DEFAULT_TTL: u32 = 86_400;
const MAX_TTL: u32 = 432_000;
const ERROR_CACHING_MIN_TTL: u32 = 300;
const DELEGATION_TTL: u32 = 300;

/// HTTPSのみで配信する。HTTPリクエストは拒否せずHTTPSへリダイレクト
const VIEWER_PROTOCOL_POLICY: ViewerProtocolPolicy = ViewerProtocolPolicy::RedirectToHttps;

const DATABASE_ENGINE: &str = "mysql";
const DATABASE_ENGINE_VERSION: &str = "8.0";
const DATABASE_INSTANCE_CLASS: &str = "db.t3.micro";
const DATABASE_PARAMETER_GROUP: &str = "default.mysql8.0";
const DATABASE_STORAGE_GIB: u32 = 10;
const DATABASE_USERNAME: &str = "root";

/// 1スタックの解決結果
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStack {
    pub project: String,
    pub stack: Environment,
    pub domain: DomainConfig,
    pub resources: ResourceSet,
    pub exports: Exports,
}

impl ResolvedStack {
    /// エンジン向けの宣言を構築
    pub fn to_declaration(&self) -> Result<Declaration> {
        let mut declaration = Declaration::new(self.project.clone(), self.stack.to_string());
        self.resources.declare_into(&mut declaration)?;
        for (name, output) in self.exports.entries() {
            declaration.export(name, output.clone());
        }
        declaration.validate()?;
        Ok(declaration)
    }
}

/// スタックのバケット名（論理名・物理名共通）
pub fn bucket_name(stack: &Environment) -> String {
    format!("{}{}", BUCKET_PREFIX, stack)
}

/// スタックのCDNディストリビューション論理名
pub fn distribution_name(stack: &Environment) -> String {
    format!("{}{}", DISTRIBUTION_PREFIX, stack)
}

/// スタックのデータベース論理名
pub fn database_instance_name(stack: &Environment) -> String {
    format!("{}{}", DATABASE_PREFIX, stack)
}

/// スタックのデータベース（スキーマ）名: "staging" → "ThrottleHeadStaging"
pub fn database_name(stack: &Environment) -> String {
    format!("{}{}", DATABASE_NAME_PREFIX, stack.capitalized())
}

/// タグ付け可能な全リソースに付与するタグ
pub fn stack_tags(project: &str, stack: &Environment) -> Tags {
    Tags::from([(format!("{}-stack", project), stack.to_string())])
}

/// スタックの全トポロジーを解決
///
/// 最初に見つかった未設定の必須キーを [`StackError::MissingConfiguration`] で返す。
/// それ以外の値は検証せずそのまま使う。
#[instrument(skip(config), fields(project = %config.project, stack = %config.stack))]
pub fn resolve(config: &StackConfig) -> Result<ResolvedStack> {
    let stack = &config.stack;
    let settings = &config.settings;

    if stack.as_str().is_empty() {
        return Err(StackError::missing("stack"));
    }

    let domain = DomainConfig::for_stack(stack, settings.parent_zone_id.clone())?;

    let ssl_cert_arn = settings
        .ssl_cert_arn
        .clone()
        .filter(|arn| !arn.is_empty())
        .ok_or_else(|| StackError::missing("sslCertArn"))?;

    let cnames = settings
        .cnames
        .clone()
        .ok_or_else(|| StackError::missing("cnames"))?;

    let rds_password = if settings.includes_database() {
        Some(
            settings
                .rds_password
                .clone()
                .ok_or_else(|| StackError::missing("rdsPassword"))?,
        )
    } else {
        None
    };

    info!(full_domain = %domain.full_domain, "Web domain resolved");
    info!(hosted_zone = %domain.full_domain, "Web hosted zone name");
    debug!(cnames = ?cnames, "CDN aliases");

    let tags = stack_tags(&config.project, stack);

    let bucket_name = bucket_name(stack);
    let bucket = Declared::new(
        bucket_name.clone(),
        Bucket {
            bucket: bucket_name,
            acl: CannedAcl::PublicRead,
            website: Website {
                index_document: INDEX_DOCUMENT.to_string(),
                error_document: ERROR_DOCUMENT.to_string(),
            },
            tags: tags.clone(),
        },
    );

    let index_object = Declared::new(
        INDEX_DOCUMENT,
        BucketObject {
            bucket: bucket.id().into(),
            acl: CannedAcl::PublicRead,
            content_type: "text/html".to_string(),
            source: FileAsset {
                path: settings
                    .index_asset
                    .clone()
                    .unwrap_or_else(|| DEFAULT_INDEX_ASSET.to_string()),
            },
        },
    );

    let distribution = Declared::new(
        distribution_name(stack),
        Distribution {
            origins: vec![Origin {
                domain_name: bucket.regional_domain_name().into(),
                origin_id: bucket.id().into(),
            }],
            enabled: true,
            is_ipv6_enabled: true,
            comment: "CloudFront distribution for throttle head web".to_string(),
            default_root_object: INDEX_DOCUMENT.to_string(),
            aliases: cnames,
            default_cache_behavior: CacheBehavior {
                allowed_methods: vec![HttpMethod::Get, HttpMethod::Head, HttpMethod::Options],
                cached_methods: vec![HttpMethod::Get, HttpMethod::Head],
                target_origin_id: bucket.id().into(),
                forwarded_values: ForwardedValues {
                    query_string: false,
                    cookies: Cookies {
                        forward: "none".to_string(),
                    },
                },
                viewer_protocol_policy: VIEWER_PROTOCOL_POLICY,
                min_ttl: MIN_TTL,
                default_ttl: DEFAULT_TTL,
                max_ttl: MAX_TTL,
                compress: true,
            },
            price_class: PriceClass::Class100,
            tags: tags.clone(),
            restrictions: Restrictions {
                geo_restriction: GeoRestriction {
                    restriction_type: "none".to_string(),
                },
            },
            viewer_certificate: ViewerCertificate {
                acm_certificate_arn: ssl_cert_arn,
                ssl_support_method: SslSupportMethod::SniOnly,
            },
            custom_error_responses: [404, 403]
                .into_iter()
                .map(|error_code| CustomErrorResponse {
                    error_code,
                    error_caching_min_ttl: ERROR_CACHING_MIN_TTL,
                    response_code: 404,
                    response_page_path: ERROR_PAGE_PATH.to_string(),
                })
                .collect(),
        },
    );

    let zone = Declared::new(
        domain.full_domain.clone(),
        HostedZone {
            comment: format!("Hosted zone for {}", domain.full_domain),
            name: domain.full_domain.clone(),
            tags: tags.clone(),
        },
    );

    let alias_record = |name: &str| Record {
        zone_id: zone.zone_id().into(),
        name: name.to_string(),
        record_type: RecordType::A,
        aliases: vec![Alias {
            name: distribution.domain_name().into(),
            zone_id: distribution.hosted_zone_id().into(),
            evaluate_target_health: true,
        }],
        records: None,
        ttl: None,
    };
    let root_record = Declared::new("base", alias_record(""));
    let www_record = Declared::new("www", alias_record("www"));

    let delegation = domain.parent_zone_id().map(|parent_zone_id| {
        debug!(name = %domain.full_domain, "Delegating subdomain from parent zone");
        Declared::new(
            domain.full_domain.clone(),
            Record {
                zone_id: parent_zone_id.clone().into(),
                name: domain.full_domain.clone(),
                record_type: RecordType::Ns,
                aliases: Vec::new(),
                records: Some(zone.name_servers().into()),
                ttl: Some(DELEGATION_TTL),
            },
        )
    });

    let database = rds_password.map(|password| {
        let db_name = database_name(stack);
        debug!(db_name = %db_name, "Including database instance");
        Declared::new(
            database_instance_name(stack),
            DatabaseInstance {
                engine: DATABASE_ENGINE.to_string(),
                engine_version: DATABASE_ENGINE_VERSION.to_string(),
                instance_class: DATABASE_INSTANCE_CLASS.to_string(),
                allocated_storage: DATABASE_STORAGE_GIB,
                parameter_group_name: DATABASE_PARAMETER_GROUP.to_string(),
                skip_final_snapshot: true,
                username: DATABASE_USERNAME.to_string(),
                password: password.into(),
                db_name,
                tags: tags.clone(),
            },
        )
    });

    let resources = ResourceSet {
        bucket,
        index_object,
        distribution,
        zone,
        root_record,
        www_record,
        delegation,
        database,
    };
    let exports = Exports::from_resources(&resources);

    Ok(ResolvedStack {
        project: config.project.clone(),
        stack: stack.clone(),
        domain,
        resources,
        exports,
    })
}
