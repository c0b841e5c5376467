//! Seed entities and relationships known at startup.

use super::types::{EntityCategory, EntityRecord, RelationCategory, RelationshipRecord};

use EntityCategory::*;
use RelationCategory::*;

const NODES: &[(&str, &str, EntityCategory)] = &[
	// AI product companies
	("openai", "OpenAI", AiProductCompany),
	("anthropic", "Anthropic", AiProductCompany),
	("xai", "xAI", AiProductCompany),
	("google-deepmind", "Google DeepMind", AiProductCompany),
	("meta-ai", "Meta AI", AiProductCompany),
	("mistral", "Mistral AI", AiProductCompany),
	("perplexity", "Perplexity AI", AiProductCompany),
	("characterai", "Character.AI", AiProductCompany),
	("stability", "Stability AI", AiProductCompany),
	("adept", "Adept AI", AiProductCompany),
	("cohere", "Cohere", AiProductCompany),
	("reka", "Reka AI", AiProductCompany),
	("runway", "Runway", AiProductCompany),
	("folio", "Figure AI", AiProductCompany),
	// AI infrastructure
	("databricks", "Databricks", AiInfraCompany),
	("snowflake", "Snowflake", AiInfraCompany),
	("huggingface", "Hugging Face", AiInfraCompany),
	("scale", "Scale AI", AiInfraCompany),
	("coreweave", "CoreWeave", AiInfraCompany),
	("deepinfra", "DeepInfra", AiInfraCompany),
	// chips
	("nvidia", "NVIDIA", ChipCompany),
	("amd", "AMD", ChipCompany),
	("intel", "Intel", ChipCompany),
	// scholars
	("yann-lecun", "Yann LeCun", AiScholar),
	("geoffrey-hinton", "Geoffrey Hinton", AiScholar),
	("ilya-sutskever", "Ilya Sutskever", AiScholar),
	("andrew-ng", "Andrew Ng", AiScholar),
	// individuals
	("sam-altman", "Sam Altman", Individual),
	("dario-amodei", "Dario Amodei", Individual),
	("elon-musk", "Elon Musk", Individual),
	("demis-hassabis", "Demis Hassabis", Individual),
];

type Link = (&'static str, &'static str, &'static str, RelationCategory, &'static str);

const LINKS: &[Link] = &[
	(
		"sam-altman",
		"openai",
		"CEO / co-founder",
		Leadership,
		"Sam Altman co-founded OpenAI in 2015 and serves as CEO, leading the company's mission to develop safe AGI.",
	),
	(
		"dario-amodei",
		"anthropic",
		"CEO / co-founder",
		Leadership,
		"Dario Amodei co-founded Anthropic in 2021 and serves as CEO, focusing on AI safety and building Claude.",
	),
	(
		"elon-musk",
		"xai",
		"Founder",
		Leadership,
		"Elon Musk founded xAI in 2023 to develop Grok, an AI assistant integrated with X (Twitter).",
	),
	(
		"demis-hassabis",
		"google-deepmind",
		"CEO",
		Leadership,
		"Demis Hassabis co-founded DeepMind in 2010 and serves as CEO, leading breakthrough AI research.",
	),
	(
		"ilya-sutskever",
		"openai",
		"Co-founder / Chief Scientist",
		Leadership,
		"Ilya Sutskever co-founded OpenAI and serves as Chief Scientist, key architect of GPT models.",
	),
	(
		"yann-lecun",
		"meta-ai",
		"Chief AI Scientist",
		Leadership,
		"Yann LeCun leads Meta AI research, developing open-source models like Llama.",
	),
	(
		"mistral",
		"huggingface",
		"Models",
		Product,
		"Mistral AI models are distributed through Hugging Face's open-source platform.",
	),
	(
		"perplexity",
		"openai",
		"Models",
		Product,
		"Perplexity uses OpenAI's GPT models to power its AI search engine.",
	),
	(
		"perplexity",
		"mistral",
		"Models",
		Product,
		"Perplexity integrates Mistral AI models alongside OpenAI for diverse AI capabilities.",
	),
	(
		"runway",
		"stability",
		"Gen video ecosystem",
		Product,
		"Runway and Stability AI collaborate in the generative video and image AI ecosystem.",
	),
	(
		"databricks",
		"mistral",
		"Investment",
		Investment,
		"Databricks invested in Mistral AI to support open-source AI model development.",
	),
	(
		"scale",
		"openai",
		"Data / evals",
		Infrastructure,
		"Scale AI provides data labeling and model evaluation services for OpenAI.",
	),
	(
		"scale",
		"anthropic",
		"Data / evals",
		Infrastructure,
		"Scale AI provides data labeling and model evaluation services for Anthropic.",
	),
	(
		"coreweave",
		"mistral",
		"Compute",
		Infrastructure,
		"CoreWeave provides GPU cloud infrastructure for Mistral AI's model training.",
	),
	(
		"coreweave",
		"runway",
		"Compute",
		Infrastructure,
		"CoreWeave provides GPU cloud infrastructure for Runway's video generation models.",
	),
	(
		"huggingface",
		"openai",
		"Open source",
		Partnership,
		"Hugging Face hosts OpenAI's open-source models and provides tools for the community.",
	),
	(
		"huggingface",
		"anthropic",
		"Open source",
		Partnership,
		"Hugging Face hosts Anthropic's open-source models and provides tools for the community.",
	),
	(
		"snowflake",
		"mistral",
		"Partnership",
		Partnership,
		"Snowflake partners with Mistral AI to integrate AI capabilities into data platforms.",
	),
	(
		"nvidia",
		"openai",
		"GPU provider",
		Infrastructure,
		"NVIDIA provides GPUs (H100, A100) that power OpenAI's model training and inference.",
	),
	(
		"nvidia",
		"anthropic",
		"GPU provider",
		Infrastructure,
		"NVIDIA provides GPUs (H100, A100) that power Anthropic's Claude model training.",
	),
	(
		"nvidia",
		"meta-ai",
		"GPU provider",
		Infrastructure,
		"NVIDIA provides GPUs that power Meta AI's Llama model training and research.",
	),
	(
		"nvidia",
		"google-deepmind",
		"GPU provider",
		Infrastructure,
		"NVIDIA provides GPUs that power Google DeepMind's AI research and model training.",
	),
	(
		"coreweave",
		"nvidia",
		"GPU infrastructure",
		Infrastructure,
		"CoreWeave builds cloud infrastructure using NVIDIA GPUs for AI workloads.",
	),
];

/// Locally known facts about a seed entity, shown when the backend has nothing better.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackInfo {
	/// One paragraph description.
	pub description: &'static str,
	/// Founding year for organisations, birth year for people.
	pub founded: Option<i32>,
	/// Founder names, empty for people.
	pub founders: &'static [&'static str],
}

const fn info(
	description: &'static str,
	founded: i32,
	founders: &'static [&'static str],
) -> FallbackInfo {
	FallbackInfo {
		description,
		founded: Some(founded),
		founders,
	}
}

/// Static detail data for seed entities.
pub fn fallback_info(id: &str) -> Option<FallbackInfo> {
	let found = match id {
		"openai" => info(
			"OpenAI is an AI research company focused on developing safe artificial general intelligence (AGI). Known for GPT models, DALL-E, and ChatGPT.",
			2015,
			&[
				"Sam Altman",
				"Elon Musk",
				"Greg Brockman",
				"Ilya Sutskever",
				"Wojciech Zaremba",
				"John Schulman",
			],
		),
		"anthropic" => info(
			"Anthropic is an AI safety startup building Claude, a large language model focused on helpfulness, harmlessness, and honesty.",
			2021,
			&[
				"Dario Amodei",
				"Daniela Amodei",
				"Tom Brown",
				"Chris Olah",
				"Sam McCandlish",
				"Jack Clarke",
				"Jared Kaplan",
			],
		),
		"xai" => info(
			"xAI is an AI company developing Grok, a conversational AI assistant integrated with X (formerly Twitter).",
			2023,
			&["Elon Musk"],
		),
		"google-deepmind" => info(
			"Google DeepMind combines deep learning and reinforcement learning to solve complex problems, including AlphaGo and AlphaFold.",
			2010,
			&["Demis Hassabis", "Shane Legg", "Mustafa Suleyman"],
		),
		"meta-ai" => info(
			"Meta AI develops AI technologies for Meta's platforms, including Llama open-source models and AI research.",
			2013,
			&["Yann LeCun"],
		),
		"mistral" => info(
			"Mistral AI is a European AI company building efficient open-source language models and enterprise AI solutions.",
			2023,
			&["Arthur Mensch", "Guillaume Lample", "Timothée Lacroix"],
		),
		"perplexity" => info(
			"Perplexity AI is an AI-powered search engine that provides conversational answers with citations.",
			2022,
			&["Aravind Srinivas", "Denis Yarats", "Johnny Ho", "Andy Konwinski"],
		),
		"characterai" => info(
			"Character.AI enables users to create and chat with AI-powered characters and personalities.",
			2021,
			&["Noam Shazeer", "Daniel De Freitas"],
		),
		"stability" => info(
			"Stability AI develops open-source AI models for image generation, including Stable Diffusion.",
			2020,
			&["Emad Mostaque"],
		),
		"adept" => info(
			"Adept AI builds AI agents that can use software tools and APIs to accomplish tasks autonomously.",
			2022,
			&["David Luan", "Ashish Vaswani", "Niki Parmar"],
		),
		"cohere" => info(
			"Cohere develops enterprise-focused language models and NLP APIs for businesses.",
			2019,
			&["Aidan Gomez", "Nick Frosst", "Ivan Zhang"],
		),
		"reka" => info(
			"Reka AI builds multimodal AI models capable of understanding text, images, and video.",
			2022,
			&["Dani Yogatama", "Yi Tay"],
		),
		"runway" => info(
			"Runway develops AI-powered creative tools for video generation, editing, and visual effects.",
			2018,
			&["Cristóbal Valenzuela", "Alejandro Matamala", "Anastasis Germanidis"],
		),
		"folio" => info(
			"Figure AI develops humanoid robots powered by advanced AI for various applications.",
			2022,
			&["Brett Adcock"],
		),
		"databricks" => info(
			"Databricks provides a unified analytics platform for data engineering, machine learning, and AI workloads.",
			2013,
			&[
				"Ali Ghodsi",
				"Andy Konwinski",
				"Ion Stoica",
				"Matei Zaharia",
				"Patrick Wendell",
				"Reynold Xin",
			],
		),
		"snowflake" => info(
			"Snowflake is a cloud data platform enabling data warehousing, data lakes, and AI/ML workloads.",
			2012,
			&["Benoit Dageville", "Thierry Cruanes", "Marcin Żukowski"],
		),
		"huggingface" => info(
			"Hugging Face provides open-source tools and models for natural language processing and machine learning.",
			2016,
			&["Clément Delangue", "Julien Chaumond", "Thomas Wolf"],
		),
		"scale" => info(
			"Scale AI provides data labeling, model evaluation, and AI infrastructure for enterprise AI development.",
			2016,
			&["Alexandr Wang", "Lucy Guo"],
		),
		"coreweave" => info(
			"CoreWeave provides high-performance cloud infrastructure optimized for AI and machine learning workloads.",
			2017,
			&["Brian Venturo", "Michael Intrator"],
		),
		"deepinfra" => info(
			"DeepInfra provides fast and cost-effective API access to open-source AI models.",
			2021,
			&["Kevin Yang"],
		),
		"nvidia" => info(
			"NVIDIA is a leading chip company specializing in GPUs for AI and machine learning. Their CUDA platform and H100/A100 chips power most modern AI training.",
			1993,
			&["Jensen Huang", "Chris Malachowsky", "Curtis Priem"],
		),
		"amd" => info(
			"AMD designs and manufactures CPUs and GPUs, including AI-optimized processors like the MI300 series for data centers.",
			1969,
			&["Jerry Sanders"],
		),
		"intel" => info(
			"Intel is a major chip manufacturer developing AI accelerators including Gaudi chips and neural processing units (NPUs).",
			1968,
			&["Gordon Moore", "Robert Noyce"],
		),
		"yann-lecun" => info(
			"Yann LeCun is a Turing Award winner, Chief AI Scientist at Meta, and pioneer of convolutional neural networks (CNNs).",
			1960,
			&[],
		),
		"geoffrey-hinton" => info(
			"Geoffrey Hinton is a Turing Award winner known as the 'Godfather of AI' for foundational work in deep learning and backpropagation.",
			1947,
			&[],
		),
		"ilya-sutskever" => info(
			"Ilya Sutskever is co-founder and Chief Scientist of OpenAI, key architect of GPT models and transformer architecture.",
			1985,
			&[],
		),
		"andrew-ng" => info(
			"Andrew Ng is a leading AI educator, co-founder of Coursera, and former head of Google Brain and Baidu AI.",
			1976,
			&[],
		),
		"sam-altman" => info(
			"Sam Altman is the CEO and co-founder of OpenAI, previously president of Y Combinator.",
			1985,
			&[],
		),
		"dario-amodei" => info(
			"Dario Amodei is the CEO and co-founder of Anthropic, previously VP of Research at OpenAI.",
			1985,
			&[],
		),
		"elon-musk" => info(
			"Elon Musk is the founder of xAI, Tesla, SpaceX, and Neuralink, focused on AI safety and development.",
			1971,
			&[],
		),
		"demis-hassabis" => info(
			"Demis Hassabis is the CEO and co-founder of Google DeepMind, a leading AI researcher.",
			1976,
			&[],
		),
		_ => return None,
	};
	Some(found)
}

/// Immutable seed graph.
#[derive(Clone, Debug)]
pub struct EntityCatalog {
	nodes: Vec<EntityRecord>,
	edges: Vec<RelationshipRecord>,
}

impl EntityCatalog {
	/// The built-in AI ecosystem seed.
	pub fn seed() -> Self {
		let nodes = NODES
			.iter()
			.map(|&(id, label, category)| EntityRecord::new(id, label, category))
			.collect();
		let edges = LINKS
			.iter()
			.map(|&(source, target, label, category, description)| RelationshipRecord {
				source_id: source.into(),
				target_id: target.into(),
				label: label.into(),
				category,
				description: description.into(),
			})
			.collect();
		Self { nodes, edges }
	}

	/// A catalog from explicit records, mostly for tests and embedding.
	pub fn from_parts(nodes: Vec<EntityRecord>, edges: Vec<RelationshipRecord>) -> Self {
		Self { nodes, edges }
	}

	/// Seed nodes in declaration order.
	pub fn nodes(&self) -> &[EntityRecord] {
		&self.nodes
	}

	/// Seed edges in declaration order.
	pub fn edges(&self) -> &[RelationshipRecord] {
		&self.edges
	}
}

impl Default for EntityCatalog {
	fn default() -> Self {
		Self::seed()
	}
}
