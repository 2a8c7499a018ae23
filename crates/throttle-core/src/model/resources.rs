//! 解決済みリソーストポロジー

use throttle_cloud::aws::{Bucket, BucketObject, DatabaseInstance, Distribution, HostedZone, Record};
use throttle_cloud::{Declaration, Declared, OutputRef};

/// 1スタックで宣言する全リソース
///
/// 委任レコードとデータベースインスタンスは一部のスタックにのみ存在し、
/// それ以外では `None`。
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSet {
    pub bucket: Declared<Bucket>,
    pub index_object: Declared<BucketObject>,
    pub distribution: Declared<Distribution>,
    pub zone: Declared<HostedZone>,
    pub root_record: Declared<Record>,
    pub www_record: Declared<Record>,
    /// 親ゾーンのNSレコード（本番以外）
    pub delegation: Option<Declared<Record>>,
    /// データベースインスタンス（データベース有効時）
    pub database: Option<Declared<DatabaseInstance>>,
}

impl ResourceSet {
    /// 宣言するリソース数
    pub fn count(&self) -> usize {
        6 + usize::from(self.delegation.is_some()) + usize::from(self.database.is_some())
    }

    /// 全リソースを固定順で `declaration` に追加
    pub fn declare_into(&self, declaration: &mut Declaration) -> throttle_cloud::Result<()> {
        declaration.declare(&self.bucket)?;
        declaration.declare(&self.index_object)?;
        declaration.declare(&self.distribution)?;
        declaration.declare(&self.zone)?;
        declaration.declare(&self.root_record)?;
        declaration.declare(&self.www_record)?;
        if let Some(delegation) = &self.delegation {
            declaration.declare(delegation)?;
        }
        if let Some(database) = &self.database {
            declaration.declare(database)?;
        }
        Ok(())
    }
}

/// スタックからエクスポートする識別子
#[derive(Debug, Clone, PartialEq)]
pub struct Exports {
    pub bucket_id: OutputRef,
    pub distribution_id: OutputRef,
    pub hosted_zone_id: OutputRef,
    pub root_record_name: OutputRef,
    pub www_record_name: OutputRef,
    pub database_id: Option<OutputRef>,
}

impl Exports {
    pub fn from_resources(resources: &ResourceSet) -> Self {
        Self {
            bucket_id: resources.bucket.id(),
            distribution_id: resources.distribution.id(),
            hosted_zone_id: resources.zone.id(),
            root_record_name: resources.root_record.record_name(),
            www_record_name: resources.www_record.record_name(),
            database_id: resources.database.as_ref().map(|db| db.id()),
        }
    }

    /// エクスポート名と出力の組
    pub fn entries(&self) -> Vec<(&'static str, &OutputRef)> {
        let mut entries = vec![
            ("s3BucketWebId", &self.bucket_id),
            ("s3DistributionId", &self.distribution_id),
            ("route53WebHostedZoneId", &self.hosted_zone_id),
            ("route53WebRecordName", &self.root_record_name),
            ("route53WebWwwRecordName", &self.www_record_name),
        ];
        if let Some(database_id) = &self.database_id {
            entries.push(("rdsInstanceId", database_id));
        }
        entries
    }
}
