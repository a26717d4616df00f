// ==========================================
// 城市固体废弃物工具集 - 分摊 API
// ==========================================
// 职责: 导入两张表 → 分摊 → 汇总报告
// 会话: 最近一次上传的表格 + 报告缓存（任一表被替换即失效）
// ==========================================

use crate::api::error::ApiResult;
use crate::config::ConfigManager;
use crate::domain::types::Material;
use crate::domain::waste::{AllocationReport, CompositionRecord, FlowRecord};
use crate::engine::allocation::{AllocationEngine, DebrisFractionTable};
use crate::engine::summary::{total_processed, totals_by_region};
use crate::importer::TableImporter;
use chrono::Utc;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// AllocationApi
// ==========================================
pub struct AllocationApi {
    importer: TableImporter,
    engine: AllocationEngine,
    debris_fractions: DebrisFractionTable,
    summary_materials: Vec<Material>,
    chart_materials: Vec<Material>,
}

impl AllocationApi {
    /// 按配置创建（标准建筑垃圾系数表）
    pub fn new(config: &ConfigManager) -> ApiResult<Self> {
        Ok(Self {
            importer: TableImporter::default(),
            engine: AllocationEngine::new(),
            debris_fractions: DebrisFractionTable::standard(),
            summary_materials: config.summary_materials()?,
            chart_materials: config.chart_materials()?,
        })
    }

    /// 替换建筑垃圾系数表
    pub fn with_debris_fractions(mut self, debris_fractions: DebrisFractionTable) -> Self {
        self.debris_fractions = debris_fractions;
        self
    }

    pub fn load_composition<P: AsRef<Path>>(&self, path: P) -> ApiResult<Vec<CompositionRecord>> {
        Ok(self.importer.import_composition(path)?)
    }

    pub fn load_flows<P: AsRef<Path>>(&self, path: P) -> ApiResult<Vec<FlowRecord>> {
        Ok(self.importer.import_flows(path)?)
    }

    /// 对已加载的表格生成分摊报告
    #[instrument(skip_all)]
    pub fn build_report(
        &self,
        composition: &[CompositionRecord],
        flows: &[FlowRecord],
    ) -> AllocationReport {
        let run = self
            .engine
            .run(composition, flows, &self.debris_fractions);

        if run.skipped_flow_rows > 0 {
            warn!(
                skipped = run.skipped_flow_rows,
                "部分流量行未匹配到重量组分记录"
            );
        }

        let total = total_processed(&run.results, &self.summary_materials);
        let by_region = totals_by_region(&run.results, &self.chart_materials);

        let report = AllocationReport {
            batch_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            results: run.results,
            skipped_flow_rows: run.skipped_flow_rows,
            total_processed: total,
            totals_by_region: by_region,
        };

        info!(
            batch_id = %report.batch_id,
            rows = report.results.len(),
            total_processed = report.total_processed,
            "分摊报告生成完成"
        );

        report
    }

    /// 从两个文件直接生成报告
    pub fn allocate_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        composition_path: P,
        flows_path: Q,
    ) -> ApiResult<AllocationReport> {
        let composition = self.load_composition(composition_path)?;
        let flows = self.load_flows(flows_path)?;
        Ok(self.build_report(&composition, &flows))
    }
}

// ==========================================
// AllocationSession - 上传会话
// ==========================================
// 失败的上传同样会丢弃该表的旧内容
pub struct AllocationSession {
    api: AllocationApi,
    composition: Option<Vec<CompositionRecord>>,
    flows: Option<Vec<FlowRecord>>,
    cached: Option<AllocationReport>,
}

impl AllocationSession {
    pub fn new(api: AllocationApi) -> Self {
        Self {
            api,
            composition: None,
            flows: None,
            cached: None,
        }
    }

    pub fn upload_composition<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<usize> {
        self.cached = None;
        self.composition = None;
        let records = self.api.load_composition(path)?;
        let count = records.len();
        self.composition = Some(records);
        Ok(count)
    }

    pub fn upload_flows<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<usize> {
        self.cached = None;
        self.flows = None;
        let records = self.api.load_flows(path)?;
        let count = records.len();
        self.flows = Some(records);
        Ok(count)
    }

    pub fn is_ready(&self) -> bool {
        self.composition.is_some() && self.flows.is_some()
    }

    /// 当前报告（两张表都已上传时才有；结果被缓存直到任一表被替换）
    pub fn report(&mut self) -> Option<&AllocationReport> {
        if self.cached.is_none() {
            let (Some(composition), Some(flows)) = (&self.composition, &self.flows) else {
                return None;
            };
            self.cached = Some(self.api.build_report(composition, flows));
        }
        self.cached.as_ref()
    }
}
