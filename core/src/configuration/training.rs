use std::fmt;

use serde::Serialize;

use super::parameter::{
    get_parameters, get_updated_parameters, ConfigurationParameter, KeyValueParameter,
};
use crate::dto::{
    DatasetPreparationDTO, DatasetPreparationUploadDTO, KeyValueParameterDTO,
    TrainingConfigurationDTO, TrainingConfigurationUploadPayloadDTO,
};
use crate::error::MappingError;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPreparation {
    pub subset_split: Vec<ConfigurationParameter>,
    pub filtering: Vec<ConfigurationParameter>,
    pub augmentation: Vec<ConfigurationParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingConfiguration {
    pub task_id: Option<String>,
    pub model_manifest_id: Option<String>,
    pub dataset_preparation: DatasetPreparation,
    pub training: Vec<ConfigurationParameter>,
    pub evaluation: Vec<ConfigurationParameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingConfigurationSection {
    SubsetSplit,
    Filtering,
    Augmentation,
    Training,
    Evaluation,
}

impl TrainingConfigurationSection {
    pub const ALL: [Self; 5] = [
        Self::SubsetSplit,
        Self::Filtering,
        Self::Augmentation,
        Self::Training,
        Self::Evaluation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubsetSplit => "subset_split",
            Self::Filtering => "filtering",
            Self::Augmentation => "augmentation",
            Self::Training => "training",
            Self::Evaluation => "evaluation",
        }
    }
}

impl fmt::Display for TrainingConfigurationSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TrainingConfiguration {
    pub fn section(&self, section: TrainingConfigurationSection) -> &[ConfigurationParameter] {
        match section {
            TrainingConfigurationSection::SubsetSplit => &self.dataset_preparation.subset_split,
            TrainingConfigurationSection::Filtering => &self.dataset_preparation.filtering,
            TrainingConfigurationSection::Augmentation => &self.dataset_preparation.augmentation,
            TrainingConfigurationSection::Training => &self.training,
            TrainingConfigurationSection::Evaluation => &self.evaluation,
        }
    }

    fn section_mut(
        &mut self,
        section: TrainingConfigurationSection,
    ) -> &mut Vec<ConfigurationParameter> {
        match section {
            TrainingConfigurationSection::SubsetSplit => &mut self.dataset_preparation.subset_split,
            TrainingConfigurationSection::Filtering => &mut self.dataset_preparation.filtering,
            TrainingConfigurationSection::Augmentation => {
                &mut self.dataset_preparation.augmentation
            }
            TrainingConfigurationSection::Training => &mut self.training,
            TrainingConfigurationSection::Evaluation => &mut self.evaluation,
        }
    }
}

pub fn get_training_configuration_entity(
    dto: TrainingConfigurationDTO,
) -> Result<TrainingConfiguration, MappingError> {
    let DatasetPreparationDTO {
        subset_split,
        filtering,
        augmentation,
    } = dto.dataset_preparation;

    Ok(TrainingConfiguration {
        task_id: dto.task_id,
        model_manifest_id: dto.model_manifest_id,
        dataset_preparation: DatasetPreparation {
            subset_split: get_parameters(subset_split)?,
            filtering: get_parameters(filtering)?,
            augmentation: get_parameters(augmentation)?,
        },
        training: get_parameters(dto.training)?,
        evaluation: get_parameters(dto.evaluation)?,
    })
}

/// Key/value changes grouped by section; sections never mentioned stay out
/// of the upload payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingConfigurationUpdate {
    pub task_id: Option<String>,
    pub model_manifest_id: Option<String>,
    pub sections: Vec<(TrainingConfigurationSection, Vec<KeyValueParameter>)>,
}

impl TrainingConfigurationUpdate {
    pub fn new(task_id: Option<String>, model_manifest_id: Option<String>) -> Self {
        Self {
            task_id,
            model_manifest_id,
            sections: Vec::new(),
        }
    }

    pub fn with_parameter(
        mut self,
        section: TrainingConfigurationSection,
        parameter: KeyValueParameter,
    ) -> Self {
        match self.sections.iter_mut().find(|(s, _)| *s == section) {
            Some((_, parameters)) => parameters.push(parameter),
            None => self.sections.push((section, vec![parameter])),
        }
        self
    }

    fn parameters(&self, section: TrainingConfigurationSection) -> Option<&[KeyValueParameter]> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, parameters)| parameters.as_slice())
    }
}

pub fn apply_training_configuration_update(
    config: &TrainingConfiguration,
    update: &TrainingConfigurationUpdate,
) -> TrainingConfiguration {
    let mut next = config.clone();
    for (section, parameters) in &update.sections {
        let updated = get_updated_parameters(config.section(*section), parameters);
        *next.section_mut(*section) = updated;
    }
    next
}

fn key_values(parameters: &[KeyValueParameter]) -> Vec<KeyValueParameterDTO> {
    parameters.iter().map(KeyValueParameterDTO::from).collect()
}

pub fn get_training_configuration_upload_payload(
    update: &TrainingConfigurationUpdate,
) -> TrainingConfigurationUploadPayloadDTO {
    use TrainingConfigurationSection::*;

    let section = |s| update.parameters(s).map(key_values);
    let subset_split = section(SubsetSplit);
    let filtering = section(Filtering);
    let augmentation = section(Augmentation);
    let dataset_preparation =
        if subset_split.is_some() || filtering.is_some() || augmentation.is_some() {
            Some(DatasetPreparationUploadDTO {
                subset_split,
                filtering,
                augmentation,
            })
        } else {
            None
        };

    TrainingConfigurationUploadPayloadDTO {
        task_id: update.task_id.clone(),
        model_manifest_id: update.model_manifest_id.clone(),
        dataset_preparation,
        training: section(Training),
        evaluation: section(Evaluation),
    }
}
